//! # Sources Crate
//!
//! This crate implements the filmography data-source boundary.
//!
//! ## Components
//!
//! ### FilmographySource
//! The trait the resolver depends on: a profile and an ordered list of role
//! entries per actor identifier, or `NotFound`.
//!
//! ### CatalogSource
//! Serves the offline catalog loaded by the `catalog` crate.
//!
//! ### TmdbSource
//! Serves live data from The Movie Database through `tmdb-client`.
//!
//! ### CachedSource
//! Bounded read-through TTL cache wrapping any source; concurrent misses share one fetch.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CachedSource, CatalogSource, FilmographySource};
//! use catalog::CatalogIndex;
//! use std::sync::Arc;
//!
//! let index = Arc::new(CatalogIndex::load_from_dir("data/catalog".as_ref())?);
//! let source = CachedSource::new(CatalogSource::new(index));
//!
//! let profile = source.get_profile("nm0000158").await?;
//! let credits = source.get_filmography("nm0000158").await?;
//! ```

pub mod cache;
pub mod catalog_source;
pub mod tmdb_source;
pub mod traits;

// Re-export commonly used types
pub use cache::CachedSource;
pub use catalog_source::CatalogSource;
pub use tmdb_source::TmdbSource;
pub use traits::{FilmographySource, SourceError};
