//! Import of the curated ingredient dataset (CSV).
//!
//! Each row is one ingredient. Two columns carry small embedded encodings:
//!
//! - `sources`: provenance labels separated by `|`
//! - `health_effects`: one health effect as `key=value` tokens separated by `;`
//!   (keys: effect_type, condition, severity, description)
//!
//! Neither encoding supports escaping. A value cannot contain `;` (or `|` in
//! sources); it may contain `=`, since only the first `=` of a token splits.

use csv::StringRecord;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ImportError;
use crate::types::{HealthEffectDetail, HealthEffectSummary, ImportedIngredients, IngredientRecord};

/// Safety rating used when a row leaves it blank.
pub const UNKNOWN_SAFETY_RATING: &str = "unknown";

/// Positions of the recognised columns in the header row.
struct Columns {
    name: Option<usize>,
    scientific_name: Option<usize>,
    cas_number: Option<usize>,
    category: Option<usize>,
    safety_rating: Option<usize>,
    description: Option<usize>,
    sources: Option<usize>,
    health_effects: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        };

        Self {
            name: find("name"),
            scientific_name: find("scientific_name"),
            cas_number: find("cas_number"),
            category: find("category"),
            safety_rating: find("safety_rating"),
            description: find("description"),
            sources: find("sources"),
            health_effects: find("health_effects"),
        }
    }
}

/// Value of a column in a row; missing columns and short rows read as "".
fn cell(record: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| record.get(i)).unwrap_or("")
}

/// Parse the `key=value;key=value` health-effect encoding.
///
/// Tokens without `=` and unknown keys are ignored. Keys and values are
/// trimmed. A key repeated within one field keeps its last value.
pub fn parse_health_effect(raw: &str) -> HealthEffectDetail {
    let mut effect = HealthEffectDetail::default();

    for token in raw.split(';') {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "effect_type" => effect.effect_type = value,
            "condition" => effect.condition = value,
            "severity" => effect.severity = value,
            "description" => effect.description = value,
            _ => {}
        }
    }

    effect
}

/// Split the `|`-separated provenance column. Blank segments are dropped.
pub fn parse_sources(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Import ingredients and aggregate health effects from CSV data.
///
/// Every row becomes one `IngredientRecord` carrying exactly one health
/// effect. Rows with a non-empty condition that has not been seen before
/// also add a `HealthEffectSummary`; later rows with the same condition are
/// not merged into it.
pub fn import_ingredients<R: Read>(reader: R) -> Result<ImportedIngredients, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(csv_reader.headers()?);

    let mut imported = ImportedIngredients::default();
    let mut seen_conditions: HashSet<String> = HashSet::new();

    for record in csv_reader.records() {
        let record = record?;

        let effect = parse_health_effect(cell(&record, columns.health_effects));
        let sources = parse_sources(cell(&record, columns.sources));

        if !effect.condition.is_empty() && seen_conditions.insert(effect.condition.clone()) {
            imported.health_effects.push(HealthEffectSummary {
                condition: effect.condition.clone(),
                description: effect.description.clone(),
                sources: sources.clone(),
            });
        }

        let safety_rating = match cell(&record, columns.safety_rating).trim() {
            "" => UNKNOWN_SAFETY_RATING,
            rating => rating,
        };

        imported.ingredients.push(IngredientRecord {
            name: cell(&record, columns.name).to_string(),
            scientific_name: cell(&record, columns.scientific_name).to_string(),
            cas_number: cell(&record, columns.cas_number).to_string(),
            category: cell(&record, columns.category).to_string(),
            safety_rating: safety_rating.to_string(),
            description: cell(&record, columns.description).to_string(),
            sources,
            health_effects: vec![effect],
        });
    }

    tracing::debug!(
        ingredients = imported.ingredients.len(),
        health_effects = imported.health_effects.len(),
        "imported ingredient dataset"
    );

    Ok(imported)
}

/// Import ingredients from a CSV file on disk.
pub fn import_ingredients_from_path(path: &Path) -> Result<ImportedIngredients, ImportError> {
    let file = File::open(path)?;
    import_ingredients(file)
}
