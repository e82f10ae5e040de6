//! Temporal aggregation and advice
//!
//! Calendar-aware statistics over the expanded record set and the
//! rule-based dietary advice derived from them.

pub mod advice;
pub mod aggregate;
pub mod calendar;

pub use advice::{generate_dietary_advice, AdviceInputs};
pub use aggregate::{build_monthly_report, MacroColumn};
