//! # Similar Tracks
//!
//! Given a seed track, [`SimilarTracksResolver`] gathers up to five playable
//! recommendations that are not the seed and not repeated.
//!
//! Recommendation batches are noisy: a batch of twenty often carries only a
//! handful of tracks with a preview clip, and the catalog answers the same
//! query differently on each call. The resolver therefore works in up to three
//! stages and stops as soon as it holds five tracks:
//!
//! ```text
//! audio features(seed)            hard dependency, failure aborts
//!        ↓
//! Stage A  recommendations(seed, features, min_popularity = 50)
//!        ↓  fewer than 5?
//! Stage B  the identical request again
//!        ↓  still fewer than 5?
//! Stage C  the same request with min_popularity re-asserted at 50
//!        ↓
//! first ≤ 5 tracks in arrival order
//! ```
//!
//! Every stage keeps the catalog's order and appends only tracks that are
//! playable, are not the seed and were not collected by an earlier stage. No
//! re-sorting happens afterwards.
//!
//! ## Known no-op fallback
//!
//! Stage C is meant to be the permissive fallback, but it asks for the same
//! minimum popularity (50) as stages A and B. The value is kept as is in
//! [`FALLBACK_MIN_POPULARITY`]; in practice Stage C is a third sample of the
//! same query.
//!
//! ## Failures, timeouts and cancellation
//!
//! Any failing call ends the resolution with that error; there is no partial
//! result. Each call is bounded by the resolver's timeout (reported as
//! [`Error::Upstream`](crate::error::Error::Upstream)) and by the request's
//! [`CancellationState`] (reported as
//! [`Error::Cancelled`](crate::error::Error::Cancelled)).
//! [`SimilarTracksResolver::resolve_latest`] ties a resolution to a
//! [`LatestRequest`], so a result for a seed the user has already moved away
//! from is dropped instead of returned.

use std::{fmt, sync::Arc, time::Duration};

use crate::{
    cancel::{self, CancellationState, LatestRequest},
    error::Result,
    spotify::{Catalog, RecommendationQuery, recommendations::MIN_POPULARITY},
    types::Track,
};

/// Upper bound on the number of similar tracks returned.
pub const MAX_SIMILAR_TRACKS: usize = 5;

/// Minimum popularity of the Stage C request. Equal to [`MIN_POPULARITY`], so
/// the fallback does not actually loosen the query.
pub const FALLBACK_MIN_POPULARITY: u32 = MIN_POPULARITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Initial,
    Repeat,
    Fallback,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Initial => write!(f, "A"),
            Stage::Repeat => write!(f, "B"),
            Stage::Fallback => write!(f, "C"),
        }
    }
}

/// The tracks collected for one seed.
///
/// Holds at most [`MAX_SIMILAR_TRACKS`] playable tracks with distinct ids, none
/// of which is the seed, in the order they were collected.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarTracks {
    seed_track_id: String,
    tracks: Vec<Track>,
}

impl SimilarTracks {
    pub fn new(seed_track_id: &str) -> Self {
        Self {
            seed_track_id: seed_track_id.to_string(),
            tracks: Vec::with_capacity(MAX_SIMILAR_TRACKS),
        }
    }

    /// Appends the qualifying tracks of `batch` in order until full.
    /// Returns how many were taken.
    pub fn absorb(&mut self, batch: Vec<Track>) -> usize {
        let before = self.tracks.len();
        for track in batch {
            if self.is_full() {
                break;
            }
            if track.id == self.seed_track_id || !track.is_playable() || self.contains(&track.id) {
                continue;
            }
            self.tracks.push(track);
        }
        self.tracks.len() - before
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    pub fn is_full(&self) -> bool {
        self.tracks.len() >= MAX_SIMILAR_TRACKS
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn seed_track_id(&self) -> &str {
        &self.seed_track_id
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

/// Resolves the similar tracks of a seed against a [`Catalog`].
///
/// The resolver holds no state between calls; it can be shared and used for
/// any number of seeds, concurrently if need be.
#[derive(Clone)]
pub struct SimilarTracksResolver {
    catalog: Arc<dyn Catalog>,
    request_timeout: Duration,
}

impl SimilarTracksResolver {
    pub fn new(catalog: Arc<dyn Catalog>, request_timeout: Duration) -> Self {
        Self {
            catalog,
            request_timeout,
        }
    }

    /// Resolves the similar tracks of `seed_track_id`.
    ///
    /// # Errors
    ///
    /// [`Error::Upstream`](crate::error::Error::Upstream) when fetching the
    /// audio features or any recommendation batch fails or times out.
    pub async fn resolve(&self, seed_track_id: &str) -> Result<SimilarTracks> {
        self.resolve_with_cancel(seed_track_id, &CancellationState::new())
            .await
    }

    /// Like [`resolve`](Self::resolve), aborting with
    /// [`Error::Cancelled`](crate::error::Error::Cancelled) as soon as `cancel`
    /// fires.
    pub async fn resolve_with_cancel(
        &self,
        seed_track_id: &str,
        cancel: &CancellationState,
    ) -> Result<SimilarTracks> {
        log::debug!("Resolving similar tracks for {}", seed_track_id);

        let features = cancel::guarded(
            cancel,
            self.request_timeout,
            || self.catalog.fetch_audio_features(seed_track_id),
        )
        .await?;

        let query = RecommendationQuery::new(seed_track_id, features);
        let mut similar = SimilarTracks::new(seed_track_id);

        self.run_stage(Stage::Initial, &query, &mut similar, cancel)
            .await?;

        if !similar.is_full() {
            self.run_stage(Stage::Repeat, &query, &mut similar, cancel)
                .await?;
        }

        if !similar.is_full() {
            let fallback = query.with_min_popularity(FALLBACK_MIN_POPULARITY);
            self.run_stage(Stage::Fallback, &fallback, &mut similar, cancel)
                .await?;
        }

        if similar.is_full() {
            log::info!(
                "Resolved {} similar tracks for {}",
                similar.len(),
                seed_track_id
            );
        } else {
            log::warn!(
                "Only {} similar tracks with a preview found for {}",
                similar.len(),
                seed_track_id
            );
        }
        Ok(similar)
    }

    /// Resolves `seed_track_id` as the latest request of `requests`.
    ///
    /// Starting this call cancels whatever request `requests` was tracking.
    /// Returns `Ok(None)` if another request was started before this one
    /// finished; its result must be discarded.
    ///
    /// Meant for long-lived callers that switch seeds while a resolution is
    /// still running; a one-shot command can call [`resolve`](Self::resolve).
    pub async fn resolve_latest(
        &self,
        requests: &LatestRequest,
        seed_track_id: &str,
    ) -> Result<Option<SimilarTracks>> {
        let ticket = requests.begin();
        let res = self
            .resolve_with_cancel(seed_track_id, ticket.cancellation())
            .await;

        if !requests.is_current(&ticket) {
            log::debug!("Discarding superseded resolution for {}", seed_track_id);
            return Ok(None);
        }
        res.map(Some)
    }

    async fn run_stage(
        &self,
        stage: Stage,
        query: &RecommendationQuery,
        similar: &mut SimilarTracks,
        cancel: &CancellationState,
    ) -> Result<()> {
        let batch = cancel::guarded(
            cancel,
            self.request_timeout,
            || self.catalog.fetch_recommendations(query),
        )
        .await?;

        let received = batch.len();
        let taken = similar.absorb(batch);
        log::debug!(
            "Stage {}: {} received, {} taken, {} collected",
            stage,
            received,
            taken,
            similar.len()
        );
        Ok(())
    }
}

impl fmt::Debug for SimilarTracksResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarTracksResolver")
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
