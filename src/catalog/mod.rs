//! Product catalog access
//!
//! External nutrition catalog lookup and the memoizing, retrying resolver
//! that the report pipeline goes through.

pub mod client;
pub mod resolver;

pub use client::{CatalogLookup, LookupError, OpenFoodFactsClient};
pub use resolver::{CatalogResolver, ResolverConfig};
