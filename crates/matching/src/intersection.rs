//! Shared-title intersection.
//!
//! ## Algorithm
//! 1. Build a TitleIndex per actor (one linear pass each)
//! 2. Walk the smaller index and probe the larger one
//! 3. Zip both actors' entries into a SharedTitleRecord, keeping the
//!    request order of the actors regardless of which index was walked
//! 4. Drop titles whose title/year disagree and report them
//! 5. Sort records and diagnostics deterministically

use crate::ordering::sort_media_list;
use crate::selector::RoleSelector;
use crate::title_index::TitleIndex;
use crate::types::{DataInconsistency, InconsistentField, MatchOutcome, SharedTitleRecord};
use catalog::FilmographyEntry;
use tracing::{debug, instrument, warn};

/// Intersect two filmographies by `title_id`.
///
/// `first` and `second` are in request order; index 0 of every record's
/// `characters`/`episodes` belongs to `first`.
#[instrument(skip_all, fields(first = first.len(), second = second.len(), selector = selector.name()))]
pub fn match_filmographies(
    first: &[FilmographyEntry],
    second: &[FilmographyEntry],
    selector: &dyn RoleSelector,
) -> MatchOutcome {
    let first_index = TitleIndex::build(first, selector);
    let second_index = TitleIndex::build(second, selector);

    let pairs: Vec<(&FilmographyEntry, &FilmographyEntry)> =
        if first_index.len() <= second_index.len() {
            first_index
                .iter()
                .filter_map(|(title_id, a)| second_index.get(title_id).map(|b| (a, b)))
                .collect()
        } else {
            second_index
                .iter()
                .filter_map(|(title_id, b)| first_index.get(title_id).map(|a| (a, b)))
                .collect()
        };

    let mut outcome = MatchOutcome::default();
    for (a, b) in pairs {
        match assemble_record(a, b) {
            Ok(record) => outcome.media_list.push(record),
            Err(inconsistency) => {
                warn!("Dropping shared title: {}", inconsistency);
                outcome.diagnostics.push(inconsistency);
            }
        }
    }

    sort_media_list(&mut outcome.media_list);
    outcome
        .diagnostics
        .sort_by(|x, y| x.title_id.cmp(&y.title_id));

    debug!(
        "Matched {} shared titles, dropped {}",
        outcome.media_list.len(),
        outcome.diagnostics.len()
    );
    outcome
}

fn format_year(year: Option<u16>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "unknown".to_string())
}

/// Zip two entries for the same title into one record.
///
/// The link comes from the first actor when present, otherwise from the
/// second. Links are hints for the presentation layer and never make a
/// record inconsistent.
pub fn assemble_record(
    a: &FilmographyEntry,
    b: &FilmographyEntry,
) -> Result<SharedTitleRecord, DataInconsistency> {
    if a.title != b.title {
        return Err(DataInconsistency {
            title_id: a.title_id.clone(),
            field: InconsistentField::Title,
            first: a.title.clone(),
            second: b.title.clone(),
        });
    }
    if a.year != b.year {
        return Err(DataInconsistency {
            title_id: a.title_id.clone(),
            field: InconsistentField::Year,
            first: format_year(a.year),
            second: format_year(b.year),
        });
    }

    Ok(SharedTitleRecord {
        title_id: a.title_id.clone(),
        title: a.title.clone(),
        year: a.year,
        link: a.link.clone().or_else(|| b.link.clone()),
        characters: [a.character.clone(), b.character.clone()],
        episodes: [a.episode_count, b.episode_count],
    })
}
