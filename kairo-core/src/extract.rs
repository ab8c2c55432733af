//! Ingredient names from a product record.
//!
//! The structured `ingredients` list is used when it names anything. Products
//! without one fall back to the free-text ingredient statement, then to the
//! ingredient taxonomy tags.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ProductRecord;

/// Separators between ingredients in a free-text statement
static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;.\n]").expect("Invalid separator regex"));

/// Leading list numbering such as "1. " or "2 "
static NUMBERING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\s*").expect("Invalid numbering regex"));

static PARENTHETICAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("Invalid parenthetical regex"));

/// A bare amount such as "12" or "5%"
static QUANTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+%?$").expect("Invalid quantity regex"));

/// Fallback names this short are fragments, not ingredients.
const MIN_FALLBACK_NAME_CHARS: usize = 3;

/// Ingredient names of a product, in label order.
pub fn ingredient_names(product: &ProductRecord) -> Vec<String> {
    let names = structured_names(product);
    if !names.is_empty() {
        return names;
    }

    if let Some(statement) = product.ingredients_statement() {
        return statement_names(statement);
    }

    tag_names(&product.ingredients_tags)
}

/// Non-blank mention texts, trimmed.
fn structured_names(product: &ProductRecord) -> Vec<String> {
    product
        .ingredients
        .iter()
        .filter_map(|ingredient| ingredient.text.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Split a statement like "Sugar, palm oil (20%), hazelnuts 13%" into names.
fn statement_names(statement: &str) -> Vec<String> {
    SEPARATOR_REGEX
        .split(statement)
        .map(|part| {
            let part = NUMBERING_REGEX.replace(part.trim(), "");
            PARENTHETICAL_REGEX.replace_all(&part, "").trim().to_string()
        })
        .filter(|name| is_long_enough(name) && !QUANTITY_REGEX.is_match(name))
        .collect()
}

/// Turn tags like `en:palm-oil` into "palm oil".
fn tag_names(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| {
            let tag = tag.strip_prefix("en:").unwrap_or(tag.as_str());
            let tag = tag.strip_prefix("fr:").unwrap_or(tag);
            tag.replace(|c: char| matches!(c, '-' | '_'), " ").trim().to_string()
        })
        .filter(|name| is_long_enough(name))
        .collect()
}

fn is_long_enough(name: &str) -> bool {
    name.chars().count() >= MIN_FALLBACK_NAME_CHARS
}
