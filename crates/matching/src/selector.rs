//! Role disambiguation.
//!
//! An actor can have several entries for one title (two characters in the
//! same film, or a series listed once per role). Matching needs exactly one
//! entry per title, chosen deterministically.

use catalog::FilmographyEntry;

/// Picks one entry when an actor has several for the same title.
///
/// Entries are offered in source order. `prefer` returns true when
/// `candidate` should replace the entry chosen so far.
pub trait RoleSelector: Send + Sync {
    /// Returns the name of this policy (for logging/debugging)
    fn name(&self) -> &str;

    fn prefer(&self, current: &FilmographyEntry, candidate: &FilmographyEntry) -> bool;
}

/// Keeps the entry with the highest episode count.
///
/// A present count beats an absent one. On a tie, including when both are
/// absent, the entry seen first in source order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxEpisodeCount;

impl RoleSelector for MaxEpisodeCount {
    fn name(&self) -> &str {
        "MaxEpisodeCount"
    }

    fn prefer(&self, current: &FilmographyEntry, candidate: &FilmographyEntry) -> bool {
        // Option orders None below every Some
        candidate.episode_count > current.episode_count
    }
}

/// Always keeps the first entry in source order
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstListed;

impl RoleSelector for FirstListed {
    fn name(&self) -> &str {
        "FirstListed"
    }

    fn prefer(&self, _current: &FilmographyEntry, _candidate: &FilmographyEntry) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(character: &str, episodes: Option<u32>) -> FilmographyEntry {
        FilmographyEntry {
            episode_count: episodes,
            ..FilmographyEntry::new("tv:1", "Ward Nine", Some(2010), character)
        }
    }

    #[test]
    fn test_higher_episode_count_wins() {
        let selector = MaxEpisodeCount;
        assert!(selector.prefer(&entry("Cameo", Some(1)), &entry("Lead", Some(10))));
        assert!(!selector.prefer(&entry("Lead", Some(10)), &entry("Cameo", Some(1))));
    }

    #[test]
    fn test_present_count_beats_absent() {
        let selector = MaxEpisodeCount;
        assert!(selector.prefer(&entry("Voice", None), &entry("Guest", Some(1))));
        assert!(!selector.prefer(&entry("Guest", Some(1)), &entry("Voice", None)));
    }

    #[test]
    fn test_ties_keep_first() {
        let selector = MaxEpisodeCount;
        assert!(!selector.prefer(&entry("First", None), &entry("Second", None)));
        assert!(!selector.prefer(&entry("First", Some(4)), &entry("Second", Some(4))));
    }

    #[test]
    fn test_first_listed() {
        assert!(!FirstListed.prefer(&entry("First", None), &entry("Second", Some(9))));
    }
}
