//! End-to-end tests for SharedFilmographyResolver.
//!
//! Uses the offline CatalogSource for data and small scripted sources for
//! failures and slowness. Timing tests run on paused tokio time.

use async_trait::async_trait;
use catalog::{ActorProfile, CatalogIndex, FilmographyEntry};
use matching::{FirstListed, InconsistentField};
use resolver::{ResolveError, ResolverConfig, RetryPolicy, SharedFilmographyResolver};
use sources::{CatalogSource, FilmographySource, SourceError};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

fn build_test_catalog() -> CatalogIndex {
    let mut index = CatalogIndex::new();
    index.insert_actor(ActorProfile::new("A", "Ada Byrne").with_img("https://img.example/a.jpg"));
    index.insert_actor(ActorProfile::new("B", "Cal Dunn"));
    index.insert_actor(ActorProfile::new("C", "Edie Fox"));
    index.insert_actor(ActorProfile::new("D", "Gus Hale"));
    index.insert_actor(ActorProfile::new("E", "Ivy Jones"));

    // A and B share T2 only
    index.insert_credit("A", FilmographyEntry::new("T1", "One", Some(2000), "A1"));
    index.insert_credit("A", FilmographyEntry::new("T2", "Two", Some(2001), "A2"));
    index.insert_credit("B", FilmographyEntry::new("T2", "Two", Some(2001), "B2"));
    index.insert_credit("B", FilmographyEntry::new("T3", "Three", Some(2002), "B3"));

    // C has three roles in one series
    index.insert_credit("C", FilmographyEntry::new("S1", "Ward Nine", Some(2010), "Lead").with_episodes(10));
    index.insert_credit("C", FilmographyEntry::new("S1", "Ward Nine", Some(2010), "Cameo").with_episodes(1));
    index.insert_credit("C", FilmographyEntry::new("S1", "Ward Nine", Some(2010), "Twin").with_episodes(10));
    index.insert_credit("D", FilmographyEntry::new("S1", "Ward Nine", Some(2010), "Friend").with_episodes(10));

    // E disagrees with D about the year of S1
    index.insert_credit("E", FilmographyEntry::new("S1", "Ward Nine", Some(2011), "Guest").with_episodes(2));

    index
}

fn catalog_resolver() -> SharedFilmographyResolver {
    SharedFilmographyResolver::new(Arc::new(CatalogSource::new(Arc::new(build_test_catalog()))))
}

/// Delegates to the catalog after `delay`; filmography requests for an actor
/// listed in `failing` always fail with the given error
struct ScriptedSource {
    inner: CatalogSource,
    failing: HashMap<String, SourceError>,
    delay: Duration,
    calls: AtomicU32,
    /// Fetches dropped while still waiting out `delay`
    abandoned: AtomicU32,
}

/// Counts a fetch as abandoned unless it reaches `finish`
struct InFlight<'a> {
    abandoned: &'a AtomicU32,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.abandoned.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            inner: CatalogSource::new(Arc::new(build_test_catalog())),
            failing: HashMap::new(),
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
            abandoned: AtomicU32::new(0),
        }
    }

    fn failing(mut self, actor_id: &str, err: SourceError) -> Self {
        self.failing.insert(actor_id.to_string(), err);
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            let in_flight = InFlight {
                abandoned: &self.abandoned,
                finished: false,
            };
            tokio::time::sleep(self.delay).await;
            in_flight.finish();
        }
    }
}

#[async_trait]
impl FilmographySource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn get_profile(&self, actor_id: &str) -> Result<ActorProfile, SourceError> {
        self.wait().await;
        self.inner.get_profile(actor_id).await
    }

    async fn get_filmography(&self, actor_id: &str) -> Result<Vec<FilmographyEntry>, SourceError> {
        self.wait().await;
        if let Some(err) = self.failing.get(actor_id) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            return Err(err.clone());
        }
        self.inner.get_filmography(actor_id).await
    }
}

#[tokio::test]
async fn test_single_shared_title() {
    let resolver = catalog_resolver();

    let result = resolver.resolve("A", "B").await.unwrap();

    assert_eq!(result.actors[0].name, "Ada Byrne");
    assert_eq!(result.actors[0].img.as_deref(), Some("https://img.example/a.jpg"));
    assert_eq!(result.actors[1].name, "Cal Dunn");
    assert_eq!(result.media_list.len(), 1);

    let record = &result.media_list[0];
    assert_eq!(record.title_id, "T2");
    assert_eq!(record.characters, ["A2".to_string(), "B2".to_string()]);
    assert!(result.diagnostics.is_empty());
}

#[tokio::test]
async fn test_multi_role_uses_max_episode_count() {
    let resolver = catalog_resolver();

    let result = resolver.resolve("C", "D").await.unwrap();

    let record = &result.media_list[0];
    // Ties on episode count keep the first-listed role
    assert_eq!(record.characters, ["Lead".to_string(), "Friend".to_string()]);
    assert_eq!(record.episodes, [Some(10), Some(10)]);
}

#[tokio::test]
async fn test_selector_is_configurable() {
    let resolver = catalog_resolver().with_selector(FirstListed);

    let result = resolver.resolve("D", "C").await.unwrap();

    assert_eq!(result.media_list[0].characters, ["Friend".to_string(), "Lead".to_string()]);
}

#[tokio::test]
async fn test_unknown_actor_is_not_found() {
    let resolver = catalog_resolver();

    let err = resolver.resolve("A", "does-not-exist").await.unwrap_err();

    assert_eq!(
        err,
        ResolveError::ActorNotFound {
            actor_id: "does-not-exist".to_string()
        }
    );
    assert_eq!(err.status_code(), 404);

    let err = resolver.resolve("does-not-exist", "B").await.unwrap_err();
    assert_eq!(
        err,
        ResolveError::ActorNotFound {
            actor_id: "does-not-exist".to_string()
        }
    );
}

#[tokio::test]
async fn test_no_shared_work_is_success() {
    let resolver = catalog_resolver();

    let result = resolver.resolve("A", "C").await.unwrap();

    assert!(!result.has_shared_work());
    assert!(result.diagnostics.is_empty());
}

#[tokio::test]
async fn test_inconsistent_year_is_reported() {
    let resolver = catalog_resolver();

    let result = resolver.resolve("D", "E").await.unwrap();

    assert!(result.media_list.is_empty());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].title_id, "S1");
    assert_eq!(result.diagnostics[0].field, InconsistentField::Year);
}

#[tokio::test]
async fn test_symmetric_results() {
    let resolver = catalog_resolver();

    let forward = resolver.resolve("C", "D").await.unwrap();
    let backward = resolver.resolve("D", "C").await.unwrap();

    assert_eq!(forward.actors[0], backward.actors[1]);
    assert_eq!(forward.media_list.len(), backward.media_list.len());
    for (f, b) in forward.media_list.iter().zip(&backward.media_list) {
        assert_eq!(f.title_id, b.title_id);
        assert_eq!(f.characters[0], b.characters[1]);
        assert_eq!(f.episodes[1], b.episodes[0]);
    }
}

#[tokio::test]
async fn test_idempotent_resolve() {
    let resolver = catalog_resolver();

    let once = serde_json::to_string(&resolver.resolve("A", "B").await.unwrap()).unwrap();
    let twice = serde_json::to_string(&resolver.resolve("A", "B").await.unwrap()).unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_invalid_inputs() {
    let resolver = catalog_resolver();

    for (a, b) in [("A", "A"), (" A", "A "), ("", "B"), ("A", "B/../C"), (".", "B"), ("A", "..")] {
        let err = resolver.resolve(a, b).await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidInput { .. }), "{a:?}/{b:?}");
        assert_eq!(err.status_code(), 400);
    }
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_exhausts_retries() {
    let source = Arc::new(ScriptedSource::new().failing("B", SourceError::Unavailable("upstream timeout".into())));
    let resolver = SharedFilmographyResolver::new(source.clone());

    let err = resolver.resolve("A", "B").await.unwrap_err();

    assert!(matches!(err, ResolveError::DataSourceUnavailable { .. }));
    assert!(err.is_retryable());
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_non_transient_failure_is_not_retried() {
    let source = Arc::new(ScriptedSource::new().failing("B", SourceError::Rejected("invalid api key".into())));
    let resolver = SharedFilmographyResolver::new(source.clone());

    let err = resolver.resolve("A", "B").await.unwrap_err();

    assert!(matches!(err, ResolveError::DataSourceUnavailable { .. }));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_count_follows_config() {
    let source = Arc::new(ScriptedSource::new().failing("B", SourceError::Unavailable("503".into())));
    let resolver = SharedFilmographyResolver::new(source.clone())
        .with_config(ResolverConfig::default().with_retry(RetryPolicy::none()));

    resolver.resolve("A", "B").await.unwrap_err();

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_expiry() {
    let source = Arc::new(ScriptedSource::new().with_delay(Duration::from_secs(30)));
    let resolver = SharedFilmographyResolver::new(source.clone())
        .with_config(ResolverConfig::default().with_deadline(Duration::from_secs(2)));
    let start = Instant::now();

    let err = resolver.resolve("A", "B").await.unwrap_err();

    assert!(matches!(err, ResolveError::DataSourceUnavailable { .. }));
    assert_eq!(start.elapsed(), Duration::from_secs(2));
    // Both profiles and both filmographies were cut off
    assert_eq!(source.abandoned.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_resolve_cancels_fetches() {
    let source = Arc::new(ScriptedSource::new().with_delay(Duration::from_secs(3)));
    let resolver = SharedFilmographyResolver::new(source.clone());

    // The caller gives up before the resolver's own deadline
    let outcome = tokio::time::timeout(Duration::from_secs(1), resolver.resolve("A", "B")).await;

    assert!(outcome.is_err());
    assert_eq!(source.abandoned.load(Ordering::SeqCst), 4);

    // Nothing keeps running in the background
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(source.abandoned.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_slow_source_within_deadline() {
    let source = Arc::new(ScriptedSource::new().with_delay(Duration::from_secs(1)));
    let resolver = SharedFilmographyResolver::new(source.clone());
    let start = Instant::now();

    let result = resolver.resolve("A", "B").await.unwrap();

    assert_eq!(result.media_list.len(), 1);
    // All four fetches run concurrently
    assert_eq!(start.elapsed(), Duration::from_secs(1));
    assert_eq!(source.abandoned.load(Ordering::SeqCst), 0);
}
