//! Ingredient resolution and the end-to-end product pipeline.

use futures::stream::{self, StreamExt};

use crate::document::build_document;
use crate::extract::ingredient_names;
use crate::http::HttpClient;
use crate::lookup::Lookup;
use crate::types::{IngredientDetail, OutputDocument, ProductQuery, ProductRecord};

/// Resolve each ingredient mention of a product to an `IngredientDetail`.
///
/// One compound lookup per ingredient name (see [`ingredient_names`]). With
/// `concurrency` of 1 the lookups run strictly one after another; higher
/// values keep up to that many in flight. Either way the output follows label
/// order.
pub async fn resolve_ingredients<C: HttpClient>(
    lookup: &Lookup<C>,
    product: &ProductRecord,
    concurrency: usize,
) -> Vec<IngredientDetail> {
    stream::iter(ingredient_names(product))
        .map(|name| async move {
            let compound = lookup.compound_by_name(&name).await;
            IngredientDetail { name, compound }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Find a product, resolve its ingredients and build the output document.
///
/// Returns None when no product was found (or the registry could not be
/// reached; the two are not distinguished).
pub async fn harvest<C: HttpClient>(
    lookup: &Lookup<C>,
    query: &ProductQuery,
    concurrency: usize,
) -> Option<OutputDocument> {
    let product = lookup.find_product(query).await?;
    let details = resolve_ingredients(lookup, &product, concurrency).await;

    tracing::debug!(
        barcode = product.barcode().unwrap_or(""),
        ingredients = details.len(),
        compounds = details.iter().filter(|d| d.compound.is_some()).count(),
        "built product document"
    );

    Some(build_document(&product, &details))
}
