//! Lookups against the food-product and chemical-compound registries.
//!
//! Every failure mode (transport error, timeout, bad status, payload of the
//! wrong shape) collapses into `None`. Callers only ever need to know whether
//! something was found.

use serde_json::Value;
use url::Url;

use crate::config::LookupConfig;
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::types::{CompoundLookupResult, ProductQuery, ProductRecord};

/// URL construction for the three registry endpoints.
#[derive(Debug, Clone)]
pub struct Endpoints {
    openfoodfacts: Url,
    pubchem: Url,
}

impl Endpoints {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            openfoodfacts: config.openfoodfacts_url.clone(),
            pubchem: config.pubchem_url.clone(),
        }
    }

    /// `{openfoodfacts}/api/v0/product/{barcode}.json`
    pub fn product_url(&self, barcode: &str) -> Url {
        let file = format!("{}.json", barcode);
        with_segments(&self.openfoodfacts, &["api", "v0", "product", &file])
    }

    /// `{openfoodfacts}/cgi/search.pl?search_terms=..&search_simple=1&action=process&json=1`
    pub fn search_url(&self, name: &str) -> Url {
        let mut url = with_segments(&self.openfoodfacts, &["cgi", "search.pl"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("search_terms", name)
            .append_pair("search_simple", "1")
            .append_pair("action", "process")
            .append_pair("json", "1");
        url
    }

    /// `{pubchem}/rest/pug/compound/name/{name}/JSON`
    pub fn compound_url(&self, name: &str) -> Url {
        with_segments(
            &self.pubchem,
            &["rest", "pug", "compound", "name", name, "JSON"],
        )
    }
}

/// Append path segments to a base URL, percent-encoding each one.
fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// The lookup adapter, generic over the HTTP client.
pub struct Lookup<C: HttpClient> {
    client: C,
    endpoints: Endpoints,
}

impl<C: HttpClient> Lookup<C> {
    pub fn new(client: C, config: &LookupConfig) -> Self {
        Self {
            client,
            endpoints: Endpoints::new(config),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch a single product by exact barcode.
    pub async fn product_by_barcode(&self, barcode: &str) -> Option<ProductRecord> {
        let url = self.endpoints.product_url(barcode);
        let body = self.fetch(&url).await?;

        let product = match body.get("product") {
            Some(Value::Object(fields)) if !fields.is_empty() => Value::Object(fields.clone()),
            _ => {
                tracing::debug!(barcode, "lookup miss: no product in response");
                return None;
            }
        };

        decode_product(product)
    }

    /// Free-text product search. Returns the first hit, as ranked by the registry.
    pub async fn search_product(&self, name: &str) -> Option<ProductRecord> {
        let url = self.endpoints.search_url(name);
        let body = self.fetch(&url).await?;

        let first = body
            .get("products")
            .and_then(Value::as_array)
            .and_then(|products| products.first())
            .cloned();

        match first {
            Some(product) => decode_product(product),
            None => {
                tracing::debug!(name, "lookup miss: search returned no products");
                None
            }
        }
    }

    /// Resolve an ingredient name to a compound identifier.
    pub async fn compound_by_name(&self, name: &str) -> Option<CompoundLookupResult> {
        let url = self.endpoints.compound_url(name);
        let body = self.fetch(&url).await?;

        let cid = body
            .get("PC_Compounds")
            .and_then(|compounds| compounds.get(0))
            .and_then(|compound| compound.get("id"))
            .and_then(|id| id.get("id"))
            .and_then(|id| id.get("cid"))
            .and_then(Value::as_u64);

        match cid {
            Some(cid) => Some(CompoundLookupResult {
                cid,
                source: url.to_string(),
            }),
            None => {
                tracing::debug!(name, "lookup miss: no compound identifier in response");
                None
            }
        }
    }

    /// Find a product the way the web form does: a barcode is fetched
    /// directly; a name is searched and its first hit re-fetched by barcode.
    pub async fn find_product(&self, query: &ProductQuery) -> Option<ProductRecord> {
        match query {
            ProductQuery::Barcode(barcode) => self.product_by_barcode(barcode).await,
            ProductQuery::Name(name) => {
                let hit = self.search_product(name).await?;
                let Some(barcode) = hit.barcode() else {
                    tracing::debug!(name, "lookup miss: search hit has no barcode");
                    return None;
                };
                self.product_by_barcode(barcode).await
            }
        }
    }

    async fn fetch(&self, url: &Url) -> Option<Value> {
        match self.client.get_json(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                log_miss(url, &e);
                None
            }
        }
    }
}

fn decode_product(value: Value) -> Option<ProductRecord> {
    match serde_json::from_value(value) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::debug!(error = %e, "lookup miss: product payload did not decode");
            None
        }
    }
}

fn log_miss(url: &Url, error: &FetchError) {
    tracing::debug!(url = %url, error = %error, "lookup miss");
}
