mod output;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kairo_core::{
    harvest, harvest_batch, import_ingredients_from_path, split_entries, Lookup, LookupConfig,
    ProductQuery, ReqwestClient,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kairo")]
#[command(about = "Aggregate product and ingredient data into a JSON document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a product in OpenFoodFacts and resolve its ingredients in PubChem
    Lookup {
        /// Product barcode (takes precedence over --name)
        #[arg(long)]
        barcode: Option<String>,
        /// Product name to search for
        #[arg(long)]
        name: Option<String>,
        /// File of barcodes or product names, separated by newlines or commas
        #[arg(long, conflicts_with_all = ["barcode", "name"])]
        batch: Option<PathBuf>,
        /// Compound lookups in flight (default: KAIRO_LOOKUP_CONCURRENCY or 1)
        #[arg(long)]
        concurrency: Option<usize>,
        /// Write the document here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Import a curated ingredient dataset (CSV)
    Import {
        /// Path to the CSV file
        csv: PathBuf,
        /// Write the result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup {
            batch: Some(batch),
            concurrency,
            output,
            ..
        } => {
            lookup_batch(&batch, concurrency, output.as_deref()).await?;
        }
        Commands::Lookup {
            barcode,
            name,
            concurrency,
            output,
            batch: None,
        } => {
            lookup(
                barcode.as_deref(),
                name.as_deref(),
                concurrency,
                output.as_deref(),
            )
            .await?;
        }
        Commands::Import { csv, output } => {
            let imported = import_ingredients_from_path(&csv)
                .with_context(|| format!("Failed to import {}", csv.display()))?;
            output::write_json(&imported, output.as_deref())?;
        }
    }

    Ok(())
}

async fn lookup(
    barcode: Option<&str>,
    name: Option<&str>,
    concurrency: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let Some(query) = ProductQuery::from_inputs(barcode, name) else {
        bail!("Enter a barcode (--barcode) or a product name (--name)");
    };

    let (lookup, concurrency) = registry_lookup(concurrency)?;

    let Some(document) = harvest(&lookup, &query, concurrency).await else {
        bail!("No product found or unable to fetch data. Check your internet connection.");
    };

    output::write_json(&document, output)
}

async fn lookup_batch(
    path: &Path,
    concurrency: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let entries = split_entries(&input);
    if entries.is_empty() {
        bail!("{} has no barcodes or product names", path.display());
    }

    let (lookup, concurrency) = registry_lookup(concurrency)?;
    let results = harvest_batch(&lookup, &entries, concurrency).await;

    tracing::info!(
        entries = results.len(),
        found = results.iter().filter(|r| r.data.is_some()).count(),
        "batch lookup finished"
    );

    output::write_json(&results, output)
}

/// Lookup adapter from the environment, with an optional concurrency override.
fn registry_lookup(concurrency: Option<usize>) -> Result<(Lookup<ReqwestClient>, usize)> {
    let mut config = LookupConfig::from_env().context("Invalid lookup configuration")?;
    if let Some(concurrency) = concurrency {
        config = config.with_concurrency(concurrency);
    }

    let client = ReqwestClient::new().context("Failed to build HTTP client")?;
    Ok((Lookup::new(client, &config), config.concurrency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_conflicts_with_single_lookup() {
        assert!(Cli::try_parse_from(["kairo", "lookup", "--batch", "list.txt"]).is_ok());
        assert!(
            Cli::try_parse_from(["kairo", "lookup", "--batch", "list.txt", "--barcode", "1"])
                .is_err()
        );
    }
}
