//! Lookup configuration from environment variables.

use std::env;
use url::Url;

use crate::error::ConfigError;

/// Default OpenFoodFacts base URL.
pub const DEFAULT_OPENFOODFACTS_URL: &str = "https://world.openfoodfacts.org";

/// Default PubChem base URL.
pub const DEFAULT_PUBCHEM_URL: &str = "https://pubchem.ncbi.nlm.nih.gov";

/// Default number of compound lookups in flight per build (sequential).
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Where the registries live and how hard to hit them.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Base URL of the food-product registry.
    pub openfoodfacts_url: Url,
    /// Base URL of the chemical-compound registry.
    pub pubchem_url: Url,
    /// Maximum compound lookups in flight for one build. Always at least 1.
    pub concurrency: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            openfoodfacts_url: Url::parse(DEFAULT_OPENFOODFACTS_URL)
                .expect("default OpenFoodFacts URL is valid"),
            pubchem_url: Url::parse(DEFAULT_PUBCHEM_URL).expect("default PubChem URL is valid"),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl LookupConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `KAIRO_OPENFOODFACTS_URL`: registry base URL (default: "https://world.openfoodfacts.org")
    /// - `KAIRO_PUBCHEM_URL`: compound registry base URL (default: "https://pubchem.ncbi.nlm.nih.gov")
    /// - `KAIRO_LOOKUP_CONCURRENCY`: compound lookups in flight (default: 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        let openfoodfacts_url = match env::var("KAIRO_OPENFOODFACTS_URL") {
            Ok(value) => parse_base_url("KAIRO_OPENFOODFACTS_URL", &value)?,
            Err(_) => parse_base_url("KAIRO_OPENFOODFACTS_URL", DEFAULT_OPENFOODFACTS_URL)?,
        };

        let pubchem_url = match env::var("KAIRO_PUBCHEM_URL") {
            Ok(value) => parse_base_url("KAIRO_PUBCHEM_URL", &value)?,
            Err(_) => parse_base_url("KAIRO_PUBCHEM_URL", DEFAULT_PUBCHEM_URL)?,
        };

        let concurrency = match env::var("KAIRO_LOOKUP_CONCURRENCY") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue("KAIRO_LOOKUP_CONCURRENCY", e.to_string()))?,
            Err(_) => DEFAULT_CONCURRENCY,
        };

        Ok(Self {
            openfoodfacts_url,
            pubchem_url,
            concurrency: concurrency.max(1),
        })
    }

    /// Override the concurrency, clamped to at least 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Parse a registry base URL. Paths get appended to it, so it must be able
/// to carry path segments (no `mailto:`/`data:` style URLs).
pub fn parse_base_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        name,
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            name,
            reason: format!("{} cannot carry a path", value),
        });
    }

    Ok(url)
}
