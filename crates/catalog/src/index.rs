//! CatalogIndex building and validation.
//!
//! Loads `actors.dat` and `credits.dat` from a directory, indexes them, and
//! checks referential integrity before the index is handed out.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl CatalogIndex {
    /// Load a catalog from a directory containing actors.dat and credits.dat
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Insert actors, rejecting duplicate ids
    /// 3. Insert credits in file order (source order is significant)
    /// 4. Validate that every credit references a known actor
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading filmography catalog from {:?}", data_dir);

        let actors_path = data_dir.join("actors.dat");
        let credits_path = data_dir.join("credits.dat");

        let (actors, credits) = rayon::join(
            || parser::parse_actors(&actors_path),
            || parser::parse_credits(&credits_path),
        );
        let actors = actors?;
        let credits = credits?;

        info!("Parsed {} actors, {} credits", actors.len(), credits.len());

        let index = Self::from_records(actors, credits)?;

        info!("Catalog successfully built and validated");
        Ok(index)
    }

    /// Build a validated index from already-parsed records
    pub fn from_records(
        actors: Vec<ActorProfile>,
        credits: Vec<(ActorId, FilmographyEntry)>,
    ) -> Result<Self> {
        let mut index = CatalogIndex::new();

        for actor in actors {
            if index.actors.contains_key(&actor.id) {
                return Err(CatalogError::DuplicateActor { id: actor.id });
            }
            index.insert_actor(actor);
        }

        for (actor_id, entry) in credits {
            index.insert_credit(actor_id, entry);
        }

        index.validate()?;
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Every actor that has credits must have a profile. Reports the
    /// smallest offending id so the error is stable across runs.
    pub fn validate(&self) -> Result<()> {
        let mut orphans: Vec<&ActorId> = self
            .credits
            .keys()
            .filter(|id| !self.actors.contains_key(*id))
            .collect();
        orphans.sort();

        match orphans.first() {
            Some(id) => Err(CatalogError::MissingReference {
                entity: "Actor".to_string(),
                id: id.to_string(),
            }),
            None => Ok(()),
        }
    }
}
