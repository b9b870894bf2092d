//! Result cache in front of a [`VetRepository`].
//!
//! Vets change rarely and are listed on every visit to the vets page, so
//! their queries are cached. Entries are keyed by the query signature
//! ([`VetQuery`]), bounded in number and expire after a time-to-live.
//! Concurrent misses on the same key share a single load.
//!
//! Hit and miss counters make it observable whether a call reached the
//! backing store.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::{Deserialize, Serialize};

use crate::{Page, PageRequest, PetClinicResult, Vet, VetRepository};

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;

/// Default time-to-live of cached vet results, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Default maximum number of cached vet results.
pub const DEFAULT_MAX_CAPACITY: u64 = 100;

/// Settings for the vet cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CacheConfig {
    /// Seconds an entry stays valid after it was loaded.
    pub ttl_secs: u64,

    /// Maximum number of cached query results.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn time_to_live(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Cache key: which repository query produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VetQuery {
    All,
    Page { page: u32, size: u32 },
}

impl From<PageRequest> for VetQuery {
    fn from(request: PageRequest) -> Self {
        VetQuery::Page {
            page: request.page(),
            size: request.size(),
        }
    }
}

/// Hit and miss counts since the cache was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Clone)]
enum CachedVets {
    All(Arc<Vec<Vet>>),
    Page(Arc<Page<Vet>>),
}

/// Caching decorator for any [`VetRepository`].
pub struct CachedVetRepository<R> {
    inner: R,
    cache: Cache<VetQuery, CachedVets>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<R: VetRepository> CachedVetRepository<R> {
    /// Wrap `inner` using the given cache settings.
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.time_to_live())
            .build();

        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop every cached result. Counters are left untouched.
    pub fn evict_all(&self) {
        self.cache.invalidate_all();
        tracing::debug!("vet cache evicted");
    }

    /// Number of live entries after pending maintenance has run.
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    async fn lookup<F>(&self, query: VetQuery, load: F) -> PetClinicResult<CachedVets>
    where
        F: std::future::Future<Output = PetClinicResult<CachedVets>>,
    {
        let loaded = AtomicBool::new(false);
        let result = self
            .cache
            .try_get_with(query, async {
                loaded.store(true, Ordering::Relaxed);
                load.await
            })
            .await
            .map_err(|e| (*e).clone());

        if loaded.load(Ordering::Relaxed) {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(query = ?query, "vet cache miss");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(query = ?query, "vet cache hit");
        }

        result
    }
}

#[async_trait]
impl<R: VetRepository> VetRepository for CachedVetRepository<R> {
    async fn find_all(&self) -> PetClinicResult<Vec<Vet>> {
        let cached = self
            .lookup(VetQuery::All, async {
                Ok(CachedVets::All(Arc::new(self.inner.find_all().await?)))
            })
            .await?;

        match cached {
            CachedVets::All(vets) => Ok(vets.as_ref().clone()),
            CachedVets::Page(page) => Ok(page.items.clone()),
        }
    }

    async fn find_page(&self, request: PageRequest) -> PetClinicResult<Page<Vet>> {
        let cached = self
            .lookup(VetQuery::from(request), async {
                Ok(CachedVets::Page(Arc::new(
                    self.inner.find_page(request).await?,
                )))
            })
            .await?;

        match cached {
            CachedVets::Page(page) => Ok(page.as_ref().clone()),
            CachedVets::All(vets) => Ok(request.slice(&vets)),
        }
    }
}
