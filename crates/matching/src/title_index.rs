//! Per-actor index from title id to the chosen entry.

use crate::selector::RoleSelector;
use catalog::FilmographyEntry;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// One actor's filmography keyed by `title_id`, one entry per title.
///
/// Borrows the entries; building it is a single pass over the filmography.
#[derive(Debug)]
pub struct TitleIndex<'a> {
    entries: HashMap<&'a str, &'a FilmographyEntry>,
}

impl<'a> TitleIndex<'a> {
    pub fn build(filmography: &'a [FilmographyEntry], selector: &dyn RoleSelector) -> Self {
        let mut entries: HashMap<&'a str, &'a FilmographyEntry> =
            HashMap::with_capacity(filmography.len());

        for entry in filmography {
            match entries.entry(entry.title_id.as_str()) {
                Entry::Occupied(mut chosen) => {
                    if selector.prefer(chosen.get(), entry) {
                        chosen.insert(entry);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }

        Self { entries }
    }

    pub fn get(&self, title_id: &str) -> Option<&'a FilmographyEntry> {
        self.entries.get(title_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a FilmographyEntry)> + '_ {
        self.entries.iter().map(|(&id, &entry)| (id, entry))
    }
}
