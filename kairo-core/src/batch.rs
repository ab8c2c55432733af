//! Batch lookups: many barcodes or product names in one go.

use crate::http::HttpClient;
use crate::lookup::Lookup;
use crate::resolve::harvest;
use crate::types::{BatchResult, ProductQuery};

/// Error reported for a batch entry that matched nothing.
pub const BATCH_NOT_FOUND: &str = "No product found.";

/// Split batch input into entries. Entries are separated by newlines or
/// commas; surrounding whitespace is dropped, as are blank entries.
pub fn split_entries(input: &str) -> Vec<String> {
    input
        .split(|c| c == '\n' || c == ',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Build one document per entry, in entry order.
///
/// Entries are processed one after another; `concurrency` applies to the
/// compound lookups within each entry. Blank entries are skipped.
pub async fn harvest_batch<C: HttpClient>(
    lookup: &Lookup<C>,
    entries: &[String],
    concurrency: usize,
) -> Vec<BatchResult> {
    let mut results = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(query) = ProductQuery::from_batch_entry(entry) else {
            continue;
        };

        let document = harvest(lookup, &query, concurrency).await;
        let error = document.is_none().then(|| BATCH_NOT_FOUND.to_string());

        results.push(BatchResult {
            entry: entry.trim().to_string(),
            data: document,
            error,
        });
    }

    tracing::debug!(
        entries = results.len(),
        found = results.iter().filter(|r| r.data.is_some()).count(),
        "batch lookup finished"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entries() {
        assert_eq!(
            split_entries("3017620422003\r\n coca cola ,, \n\nnutella,737628064502"),
            vec!["3017620422003", "coca cola", "nutella", "737628064502"]
        );
        assert!(split_entries(" \n , ").is_empty());
    }
}
