//! Output records of the matching stage.

use catalog::TitleId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One row of `media_list`: a title both actors appear in.
///
/// `characters` and `episodes` are index-aligned with the order the actors
/// were requested in, never sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedTitleRecord {
    pub title_id: TitleId,
    pub title: String,
    pub year: Option<u16>,
    pub link: Option<String>,
    pub characters: [String; 2],
    pub episodes: [Option<u32>; 2],
}

/// Which field two entries for the same title disagree on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InconsistentField {
    Title,
    Year,
}

impl fmt::Display for InconsistentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InconsistentField::Title => write!(f, "title"),
            InconsistentField::Year => write!(f, "year"),
        }
    }
}

/// The two actors' entries for one `title_id` disagree on the title or year.
///
/// Never returned as a failure: the record is dropped and this is reported
/// alongside the successful result.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field} of {title_id} differs between filmographies: {first:?} vs {second:?}")]
pub struct DataInconsistency {
    pub title_id: TitleId,
    pub field: InconsistentField,
    /// Value from the first actor's entry
    pub first: String,
    /// Value from the second actor's entry
    pub second: String,
}

/// Result of intersecting two filmographies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub media_list: Vec<SharedTitleRecord>,
    pub diagnostics: Vec<DataInconsistency>,
}
