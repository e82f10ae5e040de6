//! Report pipeline
//!
//! Expands resolved products into dated records and orchestrates the full
//! resolve, expand, aggregate, advise pipeline for one request.

use thiserror::Error;

pub mod expander;
pub mod generator;

pub use expander::expand_entries;
pub use generator::{ReportGenerator, ReportRequest};

/// Report construction error types
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report window: month {month}, year {year}")]
    InvalidWindow { month: u32, year: i32 },

    #[error("aggregation failed during {stage}: {message}")]
    Aggregation {
        stage: &'static str,
        message: String,
    },
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
