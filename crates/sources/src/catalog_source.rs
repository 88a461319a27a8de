//! FilmographySource over the offline catalog.

use crate::traits::{FilmographySource, SourceError};
use async_trait::async_trait;
use catalog::{ActorProfile, CatalogIndex, FilmographyEntry};
use std::sync::Arc;

/// Serves profiles and credits from a loaded CatalogIndex.
///
/// The index is read-only once loaded, so it is shared through an Arc
/// without any locking.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    index: Arc<CatalogIndex>,
}

impl CatalogSource {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Arc<CatalogIndex> {
        &self.index
    }
}

#[async_trait]
impl FilmographySource for CatalogSource {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn get_profile(&self, actor_id: &str) -> Result<ActorProfile, SourceError> {
        self.index
            .get_actor(actor_id)
            .cloned()
            .ok_or_else(|| SourceError::not_found(actor_id))
    }

    async fn get_filmography(&self, actor_id: &str) -> Result<Vec<FilmographyEntry>, SourceError> {
        // An actor with a profile but no credits has an empty filmography
        if self.index.get_actor(actor_id).is_none() {
            return Err(SourceError::not_found(actor_id));
        }
        Ok(self.index.get_credits(actor_id).to_vec())
    }
}
