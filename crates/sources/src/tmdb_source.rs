//! FilmographySource backed by The Movie Database.
//!
//! Maps TMDB person and combined-credit payloads onto catalog types:
//! - `title_id` is `"{media_type}:{id}"` because movie and series ids overlap
//! - `link` is `"{media_type}/{id}"`, the path of the TMDB detail page
//! - `episode_count` is kept for series credits only

use crate::traits::{FilmographySource, SourceError};
use async_trait::async_trait;
use catalog::{ActorProfile, FilmographyEntry};
use tmdb_client::{CastCredit, MediaType, TmdbClient, TmdbError};
use tracing::instrument;

/// Base URL for w185 profile images
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w185";

pub struct TmdbSource {
    client: TmdbClient,
    image_base: String,
}

impl TmdbSource {
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            image_base: DEFAULT_IMAGE_BASE.to_string(),
        }
    }

    /// Configure the prefix joined with `profile_path` (default: w185 images)
    pub fn with_image_base(mut self, image_base: impl Into<String>) -> Self {
        self.image_base = image_base.into();
        self
    }
}

/// Translate a client error into the source taxonomy
fn classify(actor_id: &str, err: TmdbError) -> SourceError {
    if err.is_not_found() {
        SourceError::not_found(actor_id)
    } else if err.is_transient() {
        SourceError::Unavailable(err.to_string())
    } else {
        match err {
            TmdbError::Decode(e) => SourceError::InvalidResponse(e.to_string()),
            other => SourceError::Rejected(other.to_string()),
        }
    }
}

fn to_entry(credit: &CastCredit) -> FilmographyEntry {
    let media = credit.media_type.as_str();
    FilmographyEntry {
        title_id: format!("{}:{}", media, credit.id),
        title: credit.display_title().to_string(),
        year: credit.year(),
        link: Some(format!("{}/{}", media, credit.id)),
        character: credit.character.clone().unwrap_or_default(),
        episode_count: match credit.media_type {
            MediaType::Tv => credit.episode_count,
            MediaType::Movie => None,
        },
    }
}

#[async_trait]
impl FilmographySource for TmdbSource {
    fn name(&self) -> &str {
        "tmdb"
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, actor_id: &str) -> Result<ActorProfile, SourceError> {
        let person = self
            .client
            .person(actor_id)
            .await
            .map_err(|e| classify(actor_id, e))?;

        Ok(ActorProfile {
            id: actor_id.to_string(),
            name: person.name,
            img: person
                .profile_path
                .map(|path| format!("{}{}", self.image_base, path)),
        })
    }

    #[instrument(skip(self))]
    async fn get_filmography(&self, actor_id: &str) -> Result<Vec<FilmographyEntry>, SourceError> {
        let credits = self
            .client
            .combined_credits(actor_id)
            .await
            .map_err(|e| classify(actor_id, e))?;

        Ok(credits.cast.iter().map(to_entry).collect())
    }
}
