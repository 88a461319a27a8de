//! Core domain types for actor filmographies.
//!
//! This module defines the records every data source produces and the
//! in-memory catalog used for offline lookups:
//! - Type aliases for domain clarity (ActorId, TitleId)
//! - Profile and filmography records with optional presentation fields
//! - CatalogIndex, a HashMap-backed store of actors and their credits

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// Identifiers are opaque strings handed out by the upstream data source

/// Stable identifier of an actor in the filmography data source
pub type ActorId = String;

/// Stable identifier of a title (movie or series). The only join key.
pub type TitleId = String;

// =============================================================================
// Actor Profile
// =============================================================================

/// Display information for one actor.
///
/// `img` is optional: when absent, the presentation layer falls back to its
/// own default image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub id: ActorId,
    pub name: String,
    pub img: Option<String>,
}

impl ActorProfile {
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            img: None,
        }
    }

    /// Attach a profile photograph URL
    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }
}

// =============================================================================
// Filmography Entry
// =============================================================================

/// One actor's appearance in one title.
///
/// An actor may have several entries for the same `title_id` (multiple
/// characters, or a series listed once per role).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmographyEntry {
    pub title_id: TitleId,
    pub title: String,
    /// Release year. `None` when upstream has no release date.
    pub year: Option<u16>,
    /// External identifier for building a detail-page URL
    pub link: Option<String>,
    pub character: String,
    /// Only present for episodic media
    pub episode_count: Option<u32>,
}

impl FilmographyEntry {
    pub fn new(
        title_id: impl Into<TitleId>,
        title: impl Into<String>,
        year: Option<u16>,
        character: impl Into<String>,
    ) -> Self {
        Self {
            title_id: title_id.into(),
            title: title.into(),
            year,
            link: None,
            character: character.into(),
            episode_count: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_episodes(mut self, episode_count: u32) -> Self {
        self.episode_count = Some(episode_count);
        self
    }
}

// =============================================================================
// CatalogIndex - offline filmography store
// =============================================================================

/// In-memory filmography store.
///
/// Provides O(1) profile lookups and returns each actor's credits as a slice
/// in the order they were inserted (source order), which the role
/// disambiguation rules depend on.
#[derive(Debug)]
pub struct CatalogIndex {
    pub(crate) actors: HashMap<ActorId, ActorProfile>,
    /// All credits of each actor, in insertion order
    pub(crate) credits: HashMap<ActorId, Vec<FilmographyEntry>>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self {
            actors: HashMap::new(),
            credits: HashMap::new(),
        }
    }

    /// Get an actor profile by ID
    pub fn get_actor(&self, id: &str) -> Option<&ActorProfile> {
        self.actors.get(id)
    }

    /// Get all credits of an actor
    ///
    /// Returns an empty slice if the actor has no credits (or is unknown;
    /// callers check `get_actor` first to tell the two apart).
    pub fn get_credits(&self, id: &str) -> &[FilmographyEntry] {
        self.credits
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All actor IDs, sorted so callers get a stable order
    pub fn actor_ids(&self) -> Vec<&ActorId> {
        let mut ids: Vec<&ActorId> = self.actors.keys().collect();
        ids.sort();
        ids
    }

    pub fn insert_actor(&mut self, actor: ActorProfile) {
        self.actors.insert(actor.id.clone(), actor);
    }

    /// Append a credit to an actor's filmography
    pub fn insert_credit(&mut self, actor_id: impl Into<ActorId>, entry: FilmographyEntry) {
        self.credits
            .entry(actor_id.into())
            .or_default()
            .push(entry);
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        let total_credits = self.credits.values().map(|v| v.len()).sum();
        (self.actors.len(), total_credits)
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}
