//! Dietary Report Analyzer (DRA) Library
//!
//! Core functionality for monthly dietary analysis: catalog resolution,
//! record expansion, temporal aggregation, and advice generation.

pub mod analysis;
pub mod build_info;
pub mod catalog;
pub mod models;
pub mod nutrition;
pub mod report;
