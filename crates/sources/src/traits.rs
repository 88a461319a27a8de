//! The data-source boundary.
//!
//! Everything the resolver knows about upstream filmography data goes
//! through the FilmographySource trait, so the offline catalog, TMDB and
//! test doubles are interchangeable.

use async_trait::async_trait;
use catalog::{ActorId, ActorProfile, FilmographyEntry};
use thiserror::Error;

/// Failures reported by a filmography source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The identifier does not resolve to an actor
    #[error("actor {actor_id} not found")]
    NotFound { actor_id: ActorId },

    /// Temporary upstream failure (timeout, rate limit, 5xx)
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// Upstream refused the request (bad credentials, bad request)
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Upstream answered with something we cannot decode
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl SourceError {
    pub fn not_found(actor_id: &str) -> Self {
        SourceError::NotFound {
            actor_id: actor_id.to_string(),
        }
    }

    /// Only transient failures are worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Unavailable(_))
    }
}

/// Read-only access to actor profiles and filmographies.
///
/// ## Design Note
/// - `Send + Sync` so one source can be shared across concurrent requests
/// - Filmographies are returned in source order; duplicate titles are left
///   for the caller to disambiguate
#[async_trait]
pub trait FilmographySource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    async fn get_profile(&self, actor_id: &str) -> Result<ActorProfile, SourceError>;

    async fn get_filmography(&self, actor_id: &str) -> Result<Vec<FilmographyEntry>, SourceError>;
}
