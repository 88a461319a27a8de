//! Read-through cache in front of any FilmographySource.
//!
//! Profiles and filmographies live in two bounded `moka` caches keyed by
//! actor id:
//! - concurrent misses for one key are coalesced into a single upstream fetch
//! - failed fetches (including `NotFound`) are never stored
//! - entries expire `ttl` after insertion and are evicted when a table is full
//! - if every caller waiting on a fetch is dropped, the fetch is dropped too

use crate::traits::{FilmographySource, SourceError};
use async_trait::async_trait;
use catalog::{ActorId, ActorProfile, FilmographyEntry};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default time-to-live; filmographies change rarely
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default bound per table
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Caches profiles and filmographies of the wrapped source.
pub struct CachedSource<S> {
    inner: S,
    profiles: Cache<ActorId, ActorProfile>,
    filmographies: Cache<ActorId, Vec<FilmographyEntry>>,
}

fn build_table<V>(ttl: Duration, max_entries: u64) -> Cache<ActorId, V>
where
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(max_entries)
        .time_to_live(ttl)
        .build()
}

impl<S: FilmographySource> CachedSource<S> {
    /// Wrap a source with the default TTL (1 hour)
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self::with_limits(inner, ttl, DEFAULT_MAX_ENTRIES)
    }

    /// `max_entries` bounds each of the two tables
    pub fn with_limits(inner: S, ttl: Duration, max_entries: u64) -> Self {
        Self {
            inner,
            profiles: build_table(ttl, max_entries),
            filmographies: build_table(ttl, max_entries),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop everything cached for one actor
    pub async fn invalidate(&self, actor_id: &str) {
        self.profiles.invalidate(actor_id).await;
        self.filmographies.invalidate(actor_id).await;
    }

    pub fn clear(&self) {
        self.profiles.invalidate_all();
        self.filmographies.invalidate_all();
    }

    /// Number of live entries across profiles and filmographies.
    ///
    /// Runs pending evictions first, so expired entries are not counted.
    pub async fn len(&self) -> u64 {
        self.profiles.run_pending_tasks().await;
        self.filmographies.run_pending_tasks().await;
        self.profiles.entry_count() + self.filmographies.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<S: FilmographySource> FilmographySource for CachedSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn get_profile(&self, actor_id: &str) -> Result<ActorProfile, SourceError> {
        self.profiles
            .try_get_with_by_ref(actor_id, async {
                debug!(actor_id, "profile cache miss, fetching upstream");
                self.inner.get_profile(actor_id).await
            })
            .await
            .map_err(Arc::unwrap_or_clone)
    }

    async fn get_filmography(&self, actor_id: &str) -> Result<Vec<FilmographyEntry>, SourceError> {
        self.filmographies
            .try_get_with_by_ref(actor_id, async {
                debug!(actor_id, "filmography cache miss, fetching upstream");
                self.inner.get_filmography(actor_id).await
            })
            .await
            .map_err(Arc::unwrap_or_clone)
    }
}
