//! Shared-title matching for two filmographies.
//!
//! This crate provides:
//! - RoleSelector trait and policies for actors with several roles per title
//! - TitleIndex, a one-entry-per-title view of a filmography
//! - match_filmographies, the intersection that produces `media_list`
//!
//! ## Architecture
//! Matching is pure and synchronous; fetching and error policy live in the
//! `resolver` crate. Given the two filmographies in request order:
//! 1. Each filmography is indexed by `title_id` (role disambiguation here)
//! 2. The smaller index is walked and probed against the larger
//! 3. Entries are zipped into SharedTitleRecords, inconsistent ones dropped
//! 4. Records are sorted newest first, then by `title_id`
//!
//! ## Example Usage
//! ```ignore
//! use matching::{match_filmographies, MaxEpisodeCount};
//!
//! let outcome = match_filmographies(&first_credits, &second_credits, &MaxEpisodeCount);
//! for record in &outcome.media_list {
//!     println!("{}: {} / {}", record.title, record.characters[0], record.characters[1]);
//! }
//! ```

pub mod intersection;
pub mod ordering;
pub mod selector;
pub mod title_index;
pub mod types;

// Re-export main types
pub use intersection::{assemble_record, match_filmographies};
pub use ordering::sort_media_list;
pub use selector::{FirstListed, MaxEpisodeCount, RoleSelector};
pub use title_index::TitleIndex;
pub use types::{DataInconsistency, InconsistentField, MatchOutcome, SharedTitleRecord};
