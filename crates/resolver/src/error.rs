//! Error taxonomy of the resolver.
//!
//! - `InvalidInput` and `ActorNotFound` are caller mistakes and are never retried
//! - `DataSourceUnavailable` is an upstream failure; the caller may retry later
//!
//! Per-title data problems are not errors: they are reported as
//! `matching::DataInconsistency` next to a successful result.

use catalog::ActorId;
use sources::SourceError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("actor not found: {actor_id}")]
    ActorNotFound { actor_id: ActorId },

    #[error("filmography data source unavailable: {reason}")]
    DataSourceUnavailable { reason: String },
}

impl ResolveError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ResolveError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// HTTP-equivalent status for callers that serve the result over HTTP
    pub fn status_code(&self) -> u16 {
        match self {
            ResolveError::InvalidInput { .. } => 400,
            ResolveError::ActorNotFound { .. } => 404,
            ResolveError::DataSourceUnavailable { .. } => 503,
        }
    }

    /// Only upstream failures can succeed on a later attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::DataSourceUnavailable { .. })
    }
}

/// Applied after retries are exhausted (or skipped for non-transient errors)
impl From<SourceError> for ResolveError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound { actor_id } => ResolveError::ActorNotFound { actor_id },
            other => ResolveError::DataSourceUnavailable {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_mapping() {
        assert_eq!(
            ResolveError::from(SourceError::not_found("a1")),
            ResolveError::ActorNotFound {
                actor_id: "a1".to_string()
            }
        );
        assert!(ResolveError::from(SourceError::Unavailable("503".into())).is_retryable());
        assert!(ResolveError::from(SourceError::Rejected("401".into())).is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ResolveError::invalid("empty").status_code(), 400);
        assert_eq!(
            ResolveError::ActorNotFound {
                actor_id: "a1".into()
            }
            .status_code(),
            404
        );
        assert!(!ResolveError::invalid("empty").is_retryable());
    }
}
