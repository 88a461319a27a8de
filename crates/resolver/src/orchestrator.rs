//! # Shared Filmography Orchestrator
//!
//! Coordinates one resolve request:
//! 1. Validate both identifiers
//! 2. Fetch profile and filmography for both actors (all four calls concurrent)
//! 3. Retry transient source failures with backoff, under one overall deadline
//! 4. Match the filmographies and return both profiles with the shared titles

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use catalog::{ActorProfile, FilmographyEntry};
use matching::{DataInconsistency, MaxEpisodeCount, RoleSelector, SharedTitleRecord, match_filmographies};
use sources::FilmographySource;

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::retry::with_retry;
use crate::validation::{validate_actor_id, validate_pair};

/// Result of a successful resolve.
///
/// `actors` and every record's `characters`/`episodes` follow the request
/// order. An empty `media_list` means the actors never worked together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedFilmography {
    pub actors: [ActorProfile; 2],
    pub media_list: Vec<SharedTitleRecord>,
    pub diagnostics: Vec<DataInconsistency>,
}

impl SharedFilmography {
    pub fn has_shared_work(&self) -> bool {
        !self.media_list.is_empty()
    }
}

/// Profile and filmography of one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDetails {
    pub profile: ActorProfile,
    pub filmography: Vec<FilmographyEntry>,
}

/// Resolves the titles two actors share.
///
/// Holds no per-request state, so one resolver (behind an Arc) serves any
/// number of concurrent requests.
pub struct SharedFilmographyResolver {
    source: Arc<dyn FilmographySource>,
    selector: Box<dyn RoleSelector>,
    config: ResolverConfig,
}

impl SharedFilmographyResolver {
    /// Create a resolver with the default config and `MaxEpisodeCount` policy
    pub fn new(source: Arc<dyn FilmographySource>) -> Self {
        Self {
            source,
            selector: Box::new(MaxEpisodeCount),
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_selector(mut self, selector: impl RoleSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Resolve the shared filmography of two actors.
    ///
    /// Fails with `InvalidInput` before any fetch, `ActorNotFound` as soon as
    /// either actor is unknown, and `DataSourceUnavailable` when the source
    /// keeps failing or the deadline expires. Partial data is never returned.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn resolve(&self, actor_a_id: &str, actor_b_id: &str) -> Result<SharedFilmography, ResolveError> {
        let start = Instant::now();
        let (first_id, second_id) = validate_pair(actor_a_id, actor_b_id)?;

        let (first, second) = self
            .within_deadline(async {
                tokio::try_join!(self.fetch_actor(first_id), self.fetch_actor(second_id))
            })
            .await?;
        let fetch_time = start.elapsed();
        debug!(
            "Fetched {} and {} credits in {:?}",
            first.filmography.len(),
            second.filmography.len(),
            fetch_time
        );

        let outcome = match_filmographies(&first.filmography, &second.filmography, self.selector.as_ref());

        info!(
            shared = outcome.media_list.len(),
            dropped = outcome.diagnostics.len(),
            "Resolved {} / {} in {:?} (fetch: {:?})",
            first_id,
            second_id,
            start.elapsed(),
            fetch_time
        );

        Ok(SharedFilmography {
            actors: [first.profile, second.profile],
            media_list: outcome.media_list,
            diagnostics: outcome.diagnostics,
        })
    }

    /// Fetch a single actor with the same validation, retry and deadline
    /// rules as `resolve`
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn actor_details(&self, actor_id: &str) -> Result<ActorDetails, ResolveError> {
        let actor_id = validate_actor_id(actor_id)?;
        self.within_deadline(self.fetch_actor(actor_id)).await
    }

    async fn fetch_actor(&self, actor_id: &str) -> Result<ActorDetails, ResolveError> {
        let retry = &self.config.retry;
        let (profile, filmography) = tokio::try_join!(
            with_retry(retry, "profile", actor_id, || self.source.get_profile(actor_id)),
            with_retry(retry, "filmography", actor_id, || self.source.get_filmography(actor_id)),
        )?;

        Ok(ActorDetails { profile, filmography })
    }

    async fn within_deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, ResolveError>>,
    ) -> Result<T, ResolveError> {
        let deadline = self.config.deadline;
        match tokio::time::timeout(deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Deadline of {:?} exceeded, discarding partial data", deadline);
                Err(ResolveError::DataSourceUnavailable {
                    reason: format!("deadline of {:?} exceeded", deadline),
                })
            }
        }
    }
}
