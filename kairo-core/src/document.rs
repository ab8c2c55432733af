//! Assembly of the output document from a product and its resolved ingredients.

use chrono::{NaiveDate, Utc};

use crate::import::UNKNOWN_SAFETY_RATING;
use crate::types::{
    IngredientDetail, IngredientMention, IngredientRecord, OutputDocument, ProductEntry,
    ProductRecord,
};

/// `data_source` label of documents built from registry lookups.
pub const DATA_SOURCE: &str = "Product Database Import";

/// Output schema version.
pub const SCHEMA_VERSION: &str = "1.0";

/// Provenance label for everything that came from the product registry.
pub const PRIMARY_SOURCE: &str = "OpenFoodFacts";

/// Status of products built from registry data.
pub const ACTIVE_STATUS: &str = "active";

/// Build the output document, dated today (UTC).
pub fn build_document(product: &ProductRecord, details: &[IngredientDetail]) -> OutputDocument {
    build_document_on(product, details, Utc::now().date_naive())
}

/// Build the output document with an explicit import date.
///
/// Each ingredient detail is projected twice: once as a mention on the
/// product entry and once as a document-level ingredient record. The
/// top-level `health_effects` list is always empty here; only the dataset
/// importer produces health effect summaries.
pub fn build_document_on(
    product: &ProductRecord,
    details: &[IngredientDetail],
    import_date: NaiveDate,
) -> OutputDocument {
    let entry = ProductEntry {
        barcode: product.barcode().unwrap_or_default().to_string(),
        name: field(&product.product_name),
        brand: field(&product.brands),
        category: field(&product.categories),
        description: field(&product.generic_name),
        status: ACTIVE_STATUS.to_string(),
        is_dummy: false,
        sources: vec![PRIMARY_SOURCE.to_string()],
        regulatory_claims: String::new(),
        active_ingredients: Vec::new(),
        inactive_ingredients: details.iter().map(mention).collect(),
    };

    OutputDocument {
        data_source: DATA_SOURCE.to_string(),
        import_date,
        version: SCHEMA_VERSION.to_string(),
        products: vec![entry],
        ingredients: details.iter().map(record).collect(),
        health_effects: Vec::new(),
    }
}

fn field(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn mention(detail: &IngredientDetail) -> IngredientMention {
    IngredientMention {
        name: detail.name.clone(),
        function: String::new(),
        sources: vec![PRIMARY_SOURCE.to_string()],
    }
}

fn record(detail: &IngredientDetail) -> IngredientRecord {
    let mut sources = vec![PRIMARY_SOURCE.to_string()];
    if let Some(compound) = &detail.compound {
        sources.push(compound.source.clone());
    }

    IngredientRecord {
        name: detail.name.clone(),
        scientific_name: String::new(),
        cas_number: String::new(),
        category: String::new(),
        safety_rating: UNKNOWN_SAFETY_RATING.to_string(),
        description: String::new(),
        sources,
        health_effects: Vec::new(),
    }
}

/// Serialize a document as indented UTF-8 JSON, the downloadable form.
pub fn to_pretty_json(document: &OutputDocument) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompoundLookupResult, LabelIngredient};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn nutella() -> ProductRecord {
        ProductRecord {
            id: Some("3017620422003".to_string()),
            product_name: Some("Nutella".to_string()),
            brands: Some("Ferrero".to_string()),
            categories: Some("Spreads".to_string()),
            generic_name: None,
            ingredients: vec![LabelIngredient::new("Sugar"), LabelIngredient::new("Palm oil")],
            ..ProductRecord::default()
        }
    }

    #[test]
    fn test_product_fields_default_to_empty() {
        let doc = build_document_on(&ProductRecord::default(), &[], date());
        let entry = &doc.products[0];

        assert_eq!(entry.barcode, "");
        assert_eq!(entry.name, "");
        assert_eq!(entry.brand, "");
        assert_eq!(entry.category, "");
        assert_eq!(entry.description, "");
        assert_eq!(entry.status, "active");
        assert!(!entry.is_dummy);
        assert_eq!(entry.sources, vec!["OpenFoodFacts"]);
        assert_eq!(entry.regulatory_claims, "");
    }

    #[test]
    fn test_zero_ingredients() {
        let doc = build_document_on(&nutella(), &[], date());
        assert!(doc.products[0].inactive_ingredients.is_empty());
        assert!(doc.products[0].active_ingredients.is_empty());
        assert!(doc.ingredients.is_empty());
        assert!(doc.health_effects.is_empty());
    }

    #[test]
    fn test_envelope() {
        let doc = build_document_on(&nutella(), &[], date());
        assert_eq!(doc.data_source, "Product Database Import");
        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.products.len(), 1);
        assert_eq!(doc.products[0].name, "Nutella");
        assert_eq!(doc.products[0].brand, "Ferrero");
    }

    #[test]
    fn test_sources_with_and_without_compound() {
        let details = vec![
            IngredientDetail::new("Sugar").with_compound(CompoundLookupResult {
                cid: 5988,
                source: "https://pubchem.example/Sugar/JSON".to_string(),
            }),
            IngredientDetail::new("Palm oil"),
        ];
        let doc = build_document_on(&nutella(), &details, date());

        assert_eq!(
            doc.ingredients[0].sources,
            vec!["OpenFoodFacts", "https://pubchem.example/Sugar/JSON"]
        );
        assert_eq!(doc.ingredients[1].sources, vec!["OpenFoodFacts"]);

        // Mentions never carry the compound source.
        for mention in &doc.products[0].inactive_ingredients {
            assert_eq!(mention.sources, vec!["OpenFoodFacts"]);
            assert_eq!(mention.function, "");
        }
    }

    #[test]
    fn test_ingredient_order_and_duplicates_preserved() {
        let details: Vec<IngredientDetail> = ["Salt", "Sugar", "Salt"]
            .iter()
            .map(|n| IngredientDetail::new(n))
            .collect();
        let doc = build_document_on(&nutella(), &details, date());

        let mentions: Vec<&str> = doc.products[0]
            .inactive_ingredients
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        let records: Vec<&str> = doc.ingredients.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(mentions, vec!["Salt", "Sugar", "Salt"]);
        assert_eq!(records, vec!["Salt", "Sugar", "Salt"]);
        assert!(doc.ingredients.iter().all(|r| r.safety_rating == "unknown"));
        assert!(doc.ingredients.iter().all(|r| r.health_effects.is_empty()));
    }

    #[test]
    fn test_import_date_format() {
        let doc = build_document_on(&nutella(), &[], date());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["import_date"], "2024-03-09");
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let doc = build_document_on(&nutella(), &[], date());
        let bytes = to_pretty_json(&doc).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\n  \"data_source\": \"Product Database Import\""));
    }
}
