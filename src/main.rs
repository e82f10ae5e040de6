//! Dietary Report Analyzer (DRA)
//!
//! Demo binary for the report pipeline: reads a complete batch request from
//! a JSON file and prints the finished monthly report as JSON.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use dra::build_info;
use dra::catalog::client::DEFAULT_BASE_URL;
use dra::catalog::{CatalogResolver, OpenFoodFactsClient};
use dra::report::{ReportGenerator, ReportRequest};

/// Get the catalog endpoint from environment or use the public default
fn get_catalog_url() -> String {
    std::env::var("DRA_CATALOG_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr so the report stays on stdout)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dra=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();

    let Some(request_path) = std::env::args().nth(1) else {
        eprintln!("Usage: dra <request.json>");
        std::process::exit(2);
    };

    let request_json = std::fs::read_to_string(&request_path)?;
    let request: ReportRequest = serde_json::from_str(&request_json)?;
    eprintln!(
        "Generating report for {}-{} over {} product entries...",
        request.month,
        request.year,
        request.products.len()
    );

    let catalog_url = get_catalog_url();
    eprintln!("Catalog endpoint: {}", catalog_url);

    let client = OpenFoodFactsClient::with_base_url(catalog_url);
    let resolver = CatalogResolver::new(Arc::new(client));
    let generator = ReportGenerator::new(resolver);

    let report = generator.generate(&request).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
