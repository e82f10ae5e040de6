//! Report generator
//!
//! The request boundary type and the orchestration of resolve, expand,
//! aggregate, and advise into one monthly report.

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::analysis::build_monthly_report;
use crate::catalog::CatalogResolver;
use crate::models::{MonthlyReport, Preferences, ProductEntry};
use crate::report::expander::expand_entries;
use crate::report::ReportResult;

/// A complete batch report request, as deserialized at the boundary
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    /// Target calendar month, 1-12
    pub month: u32,
    pub year: i32,
    pub products: Vec<ProductEntry>,
    pub preferences: Preferences,
}

/// Turns report requests into monthly reports
pub struct ReportGenerator {
    resolver: CatalogResolver,
}

impl ReportGenerator {
    pub fn new(resolver: CatalogResolver) -> Self {
        Self { resolver }
    }

    /// Generate a report using the local date as "now"
    pub async fn generate(&self, request: &ReportRequest) -> ReportResult<MonthlyReport> {
        self.generate_as_of(request, Local::now().date_naive()).await
    }

    /// Generate a report with an explicitly pinned "now"
    ///
    /// Given the same request and `today`, output is bit-identical across
    /// runs.
    pub async fn generate_as_of(
        &self,
        request: &ReportRequest,
        today: NaiveDate,
    ) -> ReportResult<MonthlyReport> {
        let codes = request.products.iter().map(|e| e.code.clone());
        let resolved = self.resolver.resolve_many(codes).await;

        let records = expand_entries(&request.products, &resolved);
        info!(
            "expanded {} entries into {} records",
            request.products.len(),
            records.len()
        );

        build_monthly_report(
            &records,
            &request.preferences,
            request.month,
            request.year,
            today,
        )
    }
}
