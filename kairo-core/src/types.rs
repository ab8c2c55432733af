use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Registry records (input)
// =============================================================================

/// Product as returned by the food-product registry.
///
/// Only the fields the document needs are kept. Every field is optional and
/// tolerant of odd types: a number where a string was expected is kept as
/// its text, anything else is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductRecord {
    /// Barcode
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Barcode as reported by search results.
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "lenient_string")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brands: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub categories: Option<String>,
    /// Free-text description
    #[serde(default, deserialize_with = "lenient_string")]
    pub generic_name: Option<String>,
    /// Ingredient mentions in label order.
    #[serde(default, deserialize_with = "lenient_ingredients")]
    pub ingredients: Vec<LabelIngredient>,
    /// Free-text ingredient statement, for products without a structured list.
    #[serde(default, deserialize_with = "lenient_string")]
    pub ingredients_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ingredients_text_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ingredients_text_fr: Option<String>,
    /// Taxonomy tags such as `en:palm-oil`.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub ingredients_tags: Vec<String>,
}

impl ProductRecord {
    /// The product's barcode: `id`, else `code`, else `_id`. Blank values are
    /// skipped.
    pub fn barcode(&self) -> Option<&str> {
        [&self.id, &self.code, &self.object_id]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    /// The first non-blank free-text ingredient statement.
    pub fn ingredients_statement(&self) -> Option<&str> {
        [
            &self.ingredients_text,
            &self.ingredients_text_en,
            &self.ingredients_text_fr,
        ]
        .into_iter()
        .filter_map(|value| value.as_deref())
        .find(|value| !value.trim().is_empty())
    }
}

/// One ingredient as printed on a product label. Free text only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LabelIngredient {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
}

impl LabelIngredient {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

/// Compound identifier found for an ingredient name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundLookupResult {
    pub cid: u64,
    /// URL of the request that produced the identifier.
    pub source: String,
}

/// An ingredient mention after compound resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDetail {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound: Option<CompoundLookupResult>,
}

impl IngredientDetail {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            compound: None,
        }
    }

    pub fn with_compound(mut self, compound: CompoundLookupResult) -> Self {
        self.compound = Some(compound);
        self
    }
}

/// How the user asked for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    Barcode(String),
    Name(String),
}

impl ProductQuery {
    /// Build a query from optional form inputs. A non-blank barcode wins over
    /// a name; returns None when both are blank.
    pub fn from_inputs(barcode: Option<&str>, name: Option<&str>) -> Option<Self> {
        let barcode = barcode.map(str::trim).filter(|b| !b.is_empty());
        let name = name.map(str::trim).filter(|n| !n.is_empty());

        match (barcode, name) {
            (Some(barcode), _) => Some(ProductQuery::Barcode(barcode.to_string())),
            (None, Some(name)) => Some(ProductQuery::Name(name.to_string())),
            (None, None) => None,
        }
    }

    /// Classify one batch entry: all ASCII digits is a barcode, anything else
    /// a product name.
    pub fn from_batch_entry(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            None
        } else if entry.bytes().all(|b| b.is_ascii_digit()) {
            Some(ProductQuery::Barcode(entry.to_string()))
        } else {
            Some(ProductQuery::Name(entry.to_string()))
        }
    }
}

// =============================================================================
// Output document
// =============================================================================

/// The aggregated document handed to the user as `data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OutputDocument {
    pub data_source: String,
    /// UTC date the document was built, `YYYY-MM-DD`.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date))]
    pub import_date: NaiveDate,
    /// Schema version
    pub version: String,
    pub products: Vec<ProductEntry>,
    pub ingredients: Vec<IngredientRecord>,
    pub health_effects: Vec<HealthEffectSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProductEntry {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub status: String,
    pub is_dummy: bool,
    pub sources: Vec<String>,
    pub regulatory_claims: String,
    pub active_ingredients: Vec<IngredientMention>,
    pub inactive_ingredients: Vec<IngredientMention>,
}

/// An ingredient as listed on a product entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IngredientMention {
    pub name: String,
    pub function: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IngredientRecord {
    pub name: String,
    pub scientific_name: String,
    pub cas_number: String,
    pub category: String,
    /// Never empty; "unknown" when not rated.
    pub safety_rating: String,
    pub description: String,
    pub sources: Vec<String>,
    pub health_effects: Vec<HealthEffectDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthEffectDetail {
    pub effect_type: String,
    pub condition: String,
    pub severity: String,
    pub description: String,
}

/// One entry per distinct condition seen during an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthEffectSummary {
    pub condition: String,
    pub description: String,
    pub sources: Vec<String>,
}

/// Result of importing a tabular ingredient dataset.
///
/// `products` is always empty; it is kept so the serialized shape lines up
/// with the product document's lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImportedIngredients {
    pub products: Vec<ProductEntry>,
    pub ingredients: Vec<IngredientRecord>,
    pub health_effects: Vec<HealthEffectSummary>,
}

/// Outcome of one entry of a batch lookup: either a document or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchResult {
    /// The entry as given.
    pub entry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OutputDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Lenient field decoding
// =============================================================================

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Vec<LabelIngredient>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .map(|item| LabelIngredient {
            text: item.get("text").and_then(|t| t.as_str()).map(String::from),
        })
        .collect())
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_record_tolerates_odd_fields() {
        let product: ProductRecord = serde_json::from_value(json!({
            "id": 3017620422003u64,
            "product_name": "Nutella",
            "brands": null,
            "categories": ["not", "a", "string"],
            "ingredients": [
                {"text": "Sugar", "percent": 56.3},
                {"id": "en:palm-oil"},
                "garbage"
            ],
            "unrelated": {"nested": true}
        }))
        .unwrap();

        assert_eq!(product.id.as_deref(), Some("3017620422003"));
        assert_eq!(product.product_name.as_deref(), Some("Nutella"));
        assert_eq!(product.brands, None);
        assert_eq!(product.categories, None);
        assert_eq!(product.generic_name, None);
        assert_eq!(
            product.ingredients,
            vec![
                LabelIngredient::new("Sugar"),
                LabelIngredient { text: None },
                LabelIngredient { text: None },
            ]
        );
    }

    #[test]
    fn test_product_record_ingredients_not_a_list() {
        let product: ProductRecord =
            serde_json::from_value(json!({"ingredients": "sugar, salt"})).unwrap();
        assert!(product.ingredients.is_empty());
    }

    #[test]
    fn test_barcode_falls_back_to_code_then_object_id() {
        let product: ProductRecord =
            serde_json::from_value(json!({"code": "5449000000996", "_id": "other"})).unwrap();
        assert_eq!(product.barcode(), Some("5449000000996"));

        let product: ProductRecord =
            serde_json::from_value(json!({"id": " ", "_id": "737628064502"})).unwrap();
        assert_eq!(product.barcode(), Some("737628064502"));

        let product: ProductRecord =
            serde_json::from_value(json!({"id": "1", "code": "2"})).unwrap();
        assert_eq!(product.barcode(), Some("1"));

        assert_eq!(ProductRecord::default().barcode(), None);
    }

    #[test]
    fn test_statement_and_tags_decoding() {
        let product: ProductRecord = serde_json::from_value(json!({
            "ingredients_text": "",
            "ingredients_text_fr": "sucre, huile de palme",
            "ingredients_tags": ["en:sugar", 7, null, "en:palm-oil"]
        }))
        .unwrap();

        assert_eq!(product.ingredients_statement(), Some("sucre, huile de palme"));
        assert_eq!(product.ingredients_tags, vec!["en:sugar", "en:palm-oil"]);
    }

    #[test]
    fn test_query_from_batch_entry() {
        assert_eq!(
            ProductQuery::from_batch_entry(" 3017620422003 "),
            Some(ProductQuery::Barcode("3017620422003".to_string()))
        );
        assert_eq!(
            ProductQuery::from_batch_entry("7up"),
            Some(ProductQuery::Name("7up".to_string()))
        );
        assert_eq!(ProductQuery::from_batch_entry("   "), None);
    }

    #[test]
    fn test_batch_result_omits_absent_side() {
        let result = BatchResult {
            entry: "nothing".to_string(),
            data: None,
            error: Some("No product found.".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"entry": "nothing", "error": "No product found."})
        );
    }

    #[test]
    fn test_query_from_inputs() {
        assert_eq!(
            ProductQuery::from_inputs(Some(" 123 "), Some("cola")),
            Some(ProductQuery::Barcode("123".to_string()))
        );
        assert_eq!(
            ProductQuery::from_inputs(Some("  "), Some("cola")),
            Some(ProductQuery::Name("cola".to_string()))
        );
        assert_eq!(ProductQuery::from_inputs(None, Some("")), None);
    }
}
