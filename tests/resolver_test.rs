use std::{
    collections::HashSet,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use songscout::{
    cancel::LatestRequest,
    error::{Error, Result},
    resolver::{MAX_SIMILAR_TRACKS, SimilarTracksResolver},
    spotify::{Catalog, RecommendationQuery},
    types::{AudioFeatures, Track},
};

const FEATURES: AudioFeatures = AudioFeatures {
    liveness: 0.12,
    valence: 0.5,
    energy: 0.8,
    tempo: 120.0,
};

fn create_test_track(id: &str, playable: bool) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        preview_url: playable.then(|| format!("https://p.scdn.co/mp3-preview/{}", id)),
        album_image_url: String::new(),
        artist_name: "Artist".to_string(),
    }
}

/// Answers every recommendation request with the next scripted batch and
/// records the queries it saw.
struct ScriptedCatalog {
    batches: Mutex<Vec<Vec<Track>>>,
    queries: Mutex<Vec<RecommendationQuery>>,
}

impl ScriptedCatalog {
    fn new(batches: Vec<Vec<Track>>) -> Self {
        Self {
            batches: Mutex::new(batches),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    async fn fetch_audio_features(&self, _track_id: &str) -> Result<AudioFeatures> {
        Ok(FEATURES)
    }

    async fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<Vec<Track>> {
        self.queries.lock().unwrap().push(query.clone());
        let mut batches = self.batches.lock().unwrap();
        if batches.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(batches.remove(0))
        }
    }
}

/// Never answers within any reasonable timeout.
struct SlowCatalog;

#[async_trait]
impl Catalog for SlowCatalog {
    async fn fetch_audio_features(&self, _track_id: &str) -> Result<AudioFeatures> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(FEATURES)
    }

    async fn fetch_recommendations(&self, _query: &RecommendationQuery) -> Result<Vec<Track>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

/// Slow for "seed-a", immediate for every other seed.
struct SeedDependentCatalog {
    calls: AtomicUsize,
}

#[async_trait]
impl Catalog for SeedDependentCatalog {
    async fn fetch_audio_features(&self, track_id: &str) -> Result<AudioFeatures> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if track_id == "seed-a" {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Ok(FEATURES)
    }

    async fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<Vec<Track>> {
        let prefix = &query.seed_track_id;
        Ok((1..=5)
            .map(|n| create_test_track(&format!("{}-rec-{}", prefix, n), true))
            .collect())
    }
}

#[tokio::test]
async fn test_seed_duplicates_and_unplayable_tracks_never_surface() {
    let catalog = Arc::new(ScriptedCatalog::new(vec![
        vec![
            create_test_track("seed", true),
            create_test_track("a", true),
            create_test_track("b", false),
            create_test_track("a", true),
        ],
        vec![
            create_test_track("c", true),
            create_test_track("seed", true),
            create_test_track("a", true),
        ],
        vec![
            create_test_track("d", true),
            create_test_track("d", true),
            create_test_track("e", true),
            create_test_track("f", true),
        ],
    ]));
    let resolver = SimilarTracksResolver::new(catalog.clone(), Duration::from_secs(1));

    let similar = resolver.resolve("seed").await.unwrap();

    let ids: Vec<&str> = similar.tracks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "d", "e", "f"]);
    assert_eq!(similar.len(), MAX_SIMILAR_TRACKS);
    assert!(similar.tracks().iter().all(Track::is_playable));

    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(catalog.query_count(), 3);
}

#[tokio::test]
async fn test_sparse_catalog_returns_what_it_has() {
    let catalog = Arc::new(ScriptedCatalog::new(vec![
        vec![create_test_track("a", true), create_test_track("x", false)],
        vec![],
        vec![create_test_track("a", true)],
    ]));
    let resolver = SimilarTracksResolver::new(catalog.clone(), Duration::from_secs(1));

    let similar = resolver.resolve("seed").await.unwrap();

    assert_eq!(similar.len(), 1);
    assert_eq!(similar.tracks()[0].id, "a");
    assert_eq!(catalog.query_count(), 3);
}

#[tokio::test]
async fn test_every_stage_queries_with_seed_features() {
    let catalog = Arc::new(ScriptedCatalog::new(Vec::new()));
    let resolver = SimilarTracksResolver::new(catalog.clone(), Duration::from_secs(1));

    let similar = resolver.resolve("seed").await.unwrap();
    assert!(similar.is_empty());

    let queries = catalog.queries.lock().unwrap();
    assert_eq!(queries.len(), 3);
    for query in queries.iter() {
        assert_eq!(query.seed_track_id, "seed");
        assert_eq!(query.features, FEATURES);
        assert_eq!(query.limit, 20);
        assert_eq!(query.min_popularity, 50);
    }
}

#[tokio::test]
async fn test_slow_catalog_times_out_as_upstream_error() {
    let resolver = SimilarTracksResolver::new(Arc::new(SlowCatalog), Duration::from_millis(50));

    let err = resolver.resolve("seed").await.unwrap_err();

    assert!(err.is_upstream(), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_superseded_request_is_discarded() {
    let catalog = Arc::new(SeedDependentCatalog {
        calls: AtomicUsize::new(0),
    });
    let resolver = SimilarTracksResolver::new(catalog.clone(), Duration::from_secs(5));
    let requests = LatestRequest::new();

    let first = resolver.resolve_latest(&requests, "seed-a");
    let second = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        resolver.resolve_latest(&requests, "seed-b").await
    };
    let (first, second) = tokio::join!(first, second);

    assert!(first.unwrap().is_none());

    let second = second.unwrap().expect("latest request must publish");
    assert_eq!(second.seed_track_id(), "seed-b");
    assert!(
        second
            .tracks()
            .iter()
            .all(|t| t.id.starts_with("seed-b-rec-"))
    );
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cancelled_request_reports_cancelled() {
    let resolver = SimilarTracksResolver::new(Arc::new(SlowCatalog), Duration::from_secs(5));
    let requests = LatestRequest::new();

    let pending = resolver.resolve_latest(&requests, "seed");
    let cancel = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        requests.cancel();
    };
    let (res, ()) = tokio::join!(pending, cancel);

    // A cancelled request is still the latest one, so the error is surfaced.
    assert!(matches!(res, Err(Error::Cancelled)));
}
