//! # Resolver Crate
//!
//! Answers "which titles have these two actors both appeared in?".
//!
//! ## Components
//!
//! ### SharedFilmographyResolver
//! Validates the request, fetches both actors from a `FilmographySource`,
//! and hands the filmographies to `matching`.
//!
//! ### ResolverConfig / RetryPolicy
//! Overall deadline and bounded exponential backoff for transient failures.
//!
//! ### ResolveError
//! `InvalidInput`, `ActorNotFound` or `DataSourceUnavailable`. Per-title
//! data problems are reported in `SharedFilmography::diagnostics` instead.
//!
//! ## Example Usage
//!
//! ```ignore
//! use resolver::{ResolverConfig, SharedFilmographyResolver};
//! use std::{sync::Arc, time::Duration};
//!
//! let resolver = SharedFilmographyResolver::new(Arc::new(source))
//!     .with_config(ResolverConfig::default().with_deadline(Duration::from_secs(2)));
//!
//! let shared = resolver.resolve("nm0000158", "nm0000138").await?;
//! println!("{} shared titles", shared.media_list.len());
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;
mod retry;
pub mod validation;

pub use config::{ResolverConfig, RetryPolicy};
pub use error::ResolveError;
pub use orchestrator::{ActorDetails, SharedFilmography, SharedFilmographyResolver};
