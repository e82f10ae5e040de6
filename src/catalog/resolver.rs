//! Catalog resolution with memoization and retry
//!
//! Wraps a `CatalogLookup` with an LRU-bounded cache of found and not-found
//! outcomes, fixed-delay retry on transient failures, at-most-one in-flight
//! resolution per code, and bounded parallelism for batches.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use tokio::sync::{Mutex, OnceCell, Semaphore};
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use tracing::{error, info, warn};

use crate::catalog::CatalogLookup;
use crate::models::CatalogProduct;

/// Resolution outcome kept in the cache; None is a memoized not-found
type CachedOutcome = Option<Arc<CatalogProduct>>;

// ============================================================================
// Configuration
// ============================================================================

/// Tunables for the catalog resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Lookup attempts per code before degrading to not-found
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
    /// Cache entries kept before least-recently-used eviction
    pub cache_capacity: NonZeroUsize,
    /// Concurrent external lookups across a batch
    pub max_concurrency: usize,
    /// Overall bound on a `resolve_many` call; codes still unresolved at
    /// expiry degrade to not-found
    pub batch_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay: Duration::from_secs(2),
            cache_capacity: match NonZeroUsize::new(1000) {
                Some(n) => n,
                None => unreachable!(),
            },
            max_concurrency: 8,
            batch_timeout: Duration::from_secs(120),
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Memoizing, retrying front of the external catalog
///
/// Cloning is cheap; clones share the cache and the in-flight table, so
/// duplicate concurrent requests for one code await a single external call.
#[derive(Clone)]
pub struct CatalogResolver {
    lookup: Arc<dyn CatalogLookup>,
    config: Arc<ResolverConfig>,
    cache: Arc<Mutex<LruCache<String, CachedOutcome>>>,
    in_flight: Arc<Mutex<HashMap<String, Arc<OnceCell<CachedOutcome>>>>>,
    semaphore: Arc<Semaphore>,
}

impl CatalogResolver {
    /// Create a resolver with default configuration
    pub fn new(lookup: Arc<dyn CatalogLookup>) -> Self {
        Self::with_config(lookup, ResolverConfig::default())
    }

    /// Create a resolver with explicit configuration
    pub fn with_config(lookup: Arc<dyn CatalogLookup>, config: ResolverConfig) -> Self {
        let cache = Arc::new(Mutex::new(LruCache::new(config.cache_capacity)));
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency));

        Self {
            lookup,
            config: Arc::new(config),
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            semaphore,
        }
    }

    /// Resolve one product code
    ///
    /// Returns the cached outcome when present. Otherwise at most one caller
    /// performs the external lookup (with retries) while duplicates await its
    /// result. Lookup failure is degraded to `None`, never an error.
    pub async fn resolve(&self, code: &str) -> Option<Arc<CatalogProduct>> {
        if let Some(outcome) = self.cache.lock().await.get(code) {
            return outcome.clone();
        }

        let cell = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(code.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let outcome = cell
            .get_or_init(|| async {
                // A winner may have filled the cache while we joined the cell
                if let Some(outcome) = self.cache.lock().await.get(code) {
                    return outcome.clone();
                }

                let _permit = match self.semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return None,
                };

                let outcome = self.fetch_with_retry(code).await.map(Arc::new);
                self.cache
                    .lock()
                    .await
                    .put(code.to_string(), outcome.clone());
                outcome
            })
            .await
            .clone();

        self.in_flight.lock().await.remove(code);
        outcome
    }

    /// Resolve a batch of codes with bounded parallelism and a batch timeout
    ///
    /// Every requested code appears in the result map; codes that could not
    /// be resolved before the timeout map to `None`.
    pub async fn resolve_many<I>(&self, codes: I) -> HashMap<String, CachedOutcome>
    where
        I: IntoIterator<Item = String>,
    {
        let mut results: HashMap<String, CachedOutcome> = HashMap::new();
        for code in codes {
            results.entry(code).or_insert(None);
        }

        let mut tasks = JoinSet::new();
        for code in results.keys().cloned() {
            let resolver = self.clone();
            tasks.spawn(async move {
                let outcome = resolver.resolve(&code).await;
                (code, outcome)
            });
        }

        let deadline = Instant::now() + self.config.batch_timeout;
        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((code, outcome)))) => {
                    results.insert(code, outcome);
                }
                Ok(Some(Err(join_error))) => {
                    warn!("catalog resolution task failed: {}", join_error);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        "catalog batch timed out after {:?}; treating {} unresolved code(s) as not found",
                        self.config.batch_timeout,
                        tasks.len()
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        results
    }

    /// Perform the external lookup with fixed-delay retries
    async fn fetch_with_retry(&self, code: &str) -> Option<CatalogProduct> {
        for attempt in 1..=self.config.max_attempts {
            match self.lookup.lookup(code).await {
                Ok(Some(product)) => return Some(product),
                Ok(None) => {
                    info!("product with code {} was not found", code);
                    return None;
                }
                Err(e) => {
                    warn!(
                        "error while fetching {}: {}. Attempt: {} of {}.",
                        code, e, attempt, self.config.max_attempts
                    );
                }
            }

            if attempt < self.config.max_attempts {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        error!(
            "failed to fetch product {} after {} attempts",
            code, self.config.max_attempts
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::catalog::LookupError;
    use crate::models::NutritionFacts;

    fn sample_product(name: &str) -> CatalogProduct {
        CatalogProduct {
            name: name.to_string(),
            per_100g: NutritionFacts {
                energy_kcal: 100.0,
                ..NutritionFacts::zero()
            },
            nutriscore: None,
            categories: None,
            packaged_quantity: Some("100g".to_string()),
        }
    }

    /// Fails the first `failures` calls, then returns `result`
    struct ScriptedLookup {
        calls: AtomicUsize,
        failures: usize,
        result: Option<CatalogProduct>,
        delay: Duration,
    }

    impl ScriptedLookup {
        fn new(failures: usize, result: Option<CatalogProduct>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
                result,
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogLookup for ScriptedLookup {
        async fn lookup(&self, _code: &str) -> Result<Option<CatalogProduct>, LookupError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if n < self.failures {
                return Err(LookupError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(self.result.clone())
        }
    }

    fn fast_config() -> ResolverConfig {
        ResolverConfig {
            retry_delay: Duration::from_millis(1),
            ..ResolverConfig::default()
        }
    }

    #[tokio::test]
    async fn test_successful_resolution_is_memoized() {
        let lookup = Arc::new(ScriptedLookup::new(0, Some(sample_product("Oats"))));
        let resolver = CatalogResolver::with_config(lookup.clone(), fast_config());

        let first = resolver.resolve("123").await;
        let second = resolver.resolve("123").await;

        assert_eq!(first.unwrap().name, "Oats");
        assert_eq!(second.unwrap().name, "Oats");
        assert_eq!(lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_memoized() {
        let lookup = Arc::new(ScriptedLookup::new(0, None));
        let resolver = CatalogResolver::with_config(lookup.clone(), fast_config());

        assert!(resolver.resolve("missing").await.is_none());
        assert!(resolver.resolve("missing").await.is_none());
        assert_eq!(lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let lookup = Arc::new(ScriptedLookup::new(2, Some(sample_product("Rice"))));
        let resolver = CatalogResolver::with_config(lookup.clone(), fast_config());

        let outcome = resolver.resolve("456").await;

        assert_eq!(outcome.unwrap().name, "Rice");
        assert_eq!(lookup.call_count(), 3);
    }

    #[tokio::test]
    async fn test_retry_exhaustion_degrades_to_not_found() {
        let lookup = Arc::new(ScriptedLookup::new(usize::MAX, None));
        let config = ResolverConfig {
            max_attempts: 3,
            ..fast_config()
        };
        let resolver = CatalogResolver::with_config(lookup.clone(), config);

        assert!(resolver.resolve("789").await.is_none());
        assert_eq!(lookup.call_count(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_share_one_lookup() {
        let lookup = Arc::new(
            ScriptedLookup::new(0, Some(sample_product("Milk")))
                .with_delay(Duration::from_millis(50)),
        );
        let resolver = CatalogResolver::with_config(lookup.clone(), fast_config());

        let a = resolver.clone();
        let b = resolver.clone();
        let (first, second) = tokio::join!(a.resolve("111"), b.resolve("111"));

        assert_eq!(first.unwrap().name, "Milk");
        assert_eq!(second.unwrap().name, "Milk");
        assert_eq!(lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_lru_eviction_refetches() {
        let lookup = Arc::new(ScriptedLookup::new(0, Some(sample_product("Bread"))));
        let config = ResolverConfig {
            cache_capacity: NonZeroUsize::new(2).unwrap(),
            ..fast_config()
        };
        let resolver = CatalogResolver::with_config(lookup.clone(), config);

        resolver.resolve("a").await;
        resolver.resolve("b").await;
        resolver.resolve("c").await; // evicts "a"
        resolver.resolve("a").await;

        assert_eq!(lookup.call_count(), 4);
    }

    #[tokio::test]
    async fn test_resolve_many_covers_every_code() {
        let lookup = Arc::new(ScriptedLookup::new(0, Some(sample_product("Eggs"))));
        let resolver = CatalogResolver::with_config(lookup.clone(), fast_config());

        let codes = vec!["1".to_string(), "2".to_string(), "1".to_string()];
        let results = resolver.resolve_many(codes).await;

        assert_eq!(results.len(), 2);
        assert!(results["1"].is_some());
        assert!(results["2"].is_some());
        // Duplicate input codes collapse to one lookup each
        assert_eq!(lookup.call_count(), 2);
    }

    #[tokio::test]
    async fn test_batch_timeout_degrades_to_not_found() {
        let lookup = Arc::new(
            ScriptedLookup::new(0, Some(sample_product("Slow")))
                .with_delay(Duration::from_secs(30)),
        );
        let config = ResolverConfig {
            batch_timeout: Duration::from_millis(50),
            ..fast_config()
        };
        let resolver = CatalogResolver::with_config(lookup.clone(), config);

        let results = resolver.resolve_many(vec!["slow".to_string()]).await;

        assert_eq!(results.len(), 1);
        assert!(results["slow"].is_none());
    }
}
