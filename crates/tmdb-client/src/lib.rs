//! TMDB client for fetching actor profiles and credits.
//!
//! This crate provides a small async client for The Movie Database v3 API.
//! It handles:
//! - Building the HTTP client with request and connect timeouts
//! - Authenticating with an API key query parameter
//! - Decoding person and combined-credit payloads
//! - Classifying failures (not found, transient, rejected)

pub mod models;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

pub use models::{CastCredit, CombinedCredits, MediaType, Person};

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Errors that can occur when talking to TMDB
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDB API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Invalid response from TMDB: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TmdbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TmdbError::Api { status_code: 404, .. })
    }

    /// Whether repeating the same request may succeed.
    ///
    /// Timeouts, connection failures, bodies cut off in transfer, rate
    /// limiting and 5xx are transient. Other API statuses and bodies that
    /// arrive whole but do not parse are not.
    pub fn is_transient(&self) -> bool {
        match self {
            // Body and decode errors here come from reading the body off the
            // wire; JSON parsing failures are `TmdbError::Decode`
            TmdbError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() || e.is_decode()
            }
            TmdbError::Api { status_code, .. } => {
                *status_code == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status_code >= 500
            }
            TmdbError::Decode(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TmdbError>;

/// Client for the TMDB person endpoints.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    /// Create a client with its own reqwest Client
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self::with_client(client, api_key))
    }

    /// Create a client around an existing reqwest Client
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            language: "en-US".to_string(),
        }
    }

    /// Point the client at another API root (e.g. a local mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /person/{id}`
    pub async fn person(&self, person_id: &str) -> Result<Person> {
        self.get_json(&format!("/person/{}", person_id)).await
    }

    /// `GET /person/{id}/combined_credits`
    pub async fn combined_credits(&self, person_id: &str) -> Result<CombinedCredits> {
        self.get_json(&format!("/person/{}/combined_credits", person_id))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                error!("TMDB returned {} for {}", status, path);
            }
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
