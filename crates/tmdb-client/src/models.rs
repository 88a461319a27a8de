//! Response payloads of the TMDB v3 person endpoints.
//!
//! Only the fields this workspace reads are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// `GET /person/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

/// `GET /person/{id}/combined_credits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedCredits {
    #[serde(default)]
    pub cast: Vec<CastCredit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

/// One acting credit. Movies carry `title`/`release_date`, series carry
/// `name`/`first_air_date`/`episode_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastCredit {
    pub id: i64,
    pub media_type: MediaType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub credit_id: Option<String>,
}

impl CastCredit {
    /// Title for movies, name for series
    pub fn display_title(&self) -> &str {
        let title = match self.media_type {
            MediaType::Movie => self.title.as_deref().or(self.name.as_deref()),
            MediaType::Tv => self.name.as_deref().or(self.title.as_deref()),
        };
        title.unwrap_or_default()
    }

    /// Release year from the first four characters of the release date.
    ///
    /// TMDB sends an empty string for unreleased titles.
    pub fn year(&self) -> Option<u16> {
        let date = match self.media_type {
            MediaType::Movie => self.release_date.as_deref(),
            MediaType::Tv => self.first_air_date.as_deref(),
        }?;
        date.get(..4)?.parse().ok()
    }
}
