//! # Catalog Crate
//!
//! Domain types shared by every filmography data source, plus an offline,
//! file-backed catalog of actors and their credits.
//!
//! ## Main Components
//!
//! - **types**: ActorProfile, FilmographyEntry, CatalogIndex
//! - **parser**: Parse actors.dat / credits.dat into Rust structs
//! - **index**: Build and validate a CatalogIndex from a directory
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogIndex;
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_dir(Path::new("data/catalog"))?;
//!
//! let actor = index.get_actor("nm0000158").unwrap();
//! let credits = index.get_credits("nm0000158");
//!
//! println!("{} has {} credits", actor.name, credits.len());
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{CatalogError, Result};
pub use types::{ActorId, ActorProfile, CatalogIndex, FilmographyEntry, TitleId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_index_creation() {
        let index = CatalogIndex::new();
        assert_eq!(index.counts(), (0, 0));
    }

    #[test]
    fn test_insert_actor() {
        let mut index = CatalogIndex::new();
        index.insert_actor(ActorProfile::new("a1", "Ann Lee").with_img("https://img.example/a1.jpg"));

        let retrieved = index.get_actor("a1").unwrap();
        assert_eq!(retrieved.name, "Ann Lee");
        assert_eq!(retrieved.img.as_deref(), Some("https://img.example/a1.jpg"));
    }

    #[test]
    fn test_credits_keep_insertion_order() {
        let mut index = CatalogIndex::new();
        index.insert_credit("a1", FilmographyEntry::new("tv:3", "Ward Nine", Some(2010), "Nurse Ray"));
        index.insert_credit("a1", FilmographyEntry::new("movie:1", "Harbor", Some(2001), "Nell"));
        index.insert_credit("a1", FilmographyEntry::new("tv:3", "Ward Nine", Some(2010), "Patient"));

        let titles: Vec<&str> = index
            .get_credits("a1")
            .iter()
            .map(|c| c.character.as_str())
            .collect();
        assert_eq!(titles, vec!["Nurse Ray", "Nell", "Patient"]);
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();
        assert!(index.get_actor("nobody").is_none());
        assert!(index.get_credits("nobody").is_empty());
        assert!(index.actor_ids().is_empty());
    }

    #[test]
    fn test_optional_fields_serialize_as_null() {
        let entry = FilmographyEntry::new("movie:1", "Harbor", None, "Nell");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["year"].is_null());
        assert!(json["link"].is_null());
        assert!(json["episode_count"].is_null());
    }
}
