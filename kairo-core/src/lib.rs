pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod http;
pub mod import;
pub mod lookup;
pub mod resolve;
pub mod types;

pub use batch::{harvest_batch, split_entries, BATCH_NOT_FOUND};
pub use config::LookupConfig;
pub use document::{build_document, build_document_on, to_pretty_json};
pub use error::{ConfigError, FetchError, ImportError};
pub use extract::ingredient_names;
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient};
pub use import::{import_ingredients, import_ingredients_from_path};
pub use lookup::{Endpoints, Lookup};
pub use resolve::{harvest, resolve_ingredients};
pub use types::{
    BatchResult, CompoundLookupResult, HealthEffectDetail, HealthEffectSummary,
    ImportedIngredients, IngredientDetail, IngredientMention, IngredientRecord, LabelIngredient,
    OutputDocument, ProductEntry, ProductQuery, ProductRecord,
};
