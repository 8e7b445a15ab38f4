//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by songscout. It
//! is the catalog adapter: every track, search result, audio-feature vector and
//! recommendation batch the application shows comes through here.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, SimilarTracksResolver)
//!          ↓
//! Catalog trait (fetch features, fetch recommendations)
//!          ↓
//! SpotifyClient
//!     ├── Token cache (client-credentials grant)
//!     ├── Track Operations (popular playlist, search, single track)
//!     └── Recommendation Operations (audio features, recommendations)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`client`] - the [`SpotifyClient`] itself: HTTP client, token cache and the
//!   shared request/response handling
//! - [`tracks`] - popular tracks, keyword search and single-track lookup
//! - [`recommendations`] - audio features and recommendation batches, plus the
//!   [`RecommendationQuery`] describing one recommendation request
//!
//! ## Authentication Strategy
//!
//! The catalog is queried with an app-only token obtained through the OAuth 2.0
//! client-credentials grant. The token lives in a [`TokenManager`] owned by the
//! client; it is requested lazily on the first call and re-requested once it is
//! within four minutes of its expiry.
//!
//! ## Error Handling
//!
//! Every failure (transport error, non-success status, malformed payload,
//! timeout) is reported as [`Error::Upstream`](crate::error::Error::Upstream). No
//! call is retried automatically; the caller decides whether to surface the error
//! and let the user try again.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client-credentials token
//! - `GET /playlists/{id}/tracks` - the popular playlist
//! - `GET /search` - keyword search over tracks
//! - `GET /tracks/{id}` - a single track
//! - `GET /audio-features/{id}` - audio features of the seed track
//! - `GET /recommendations` - recommendation batches
//!
//! [`TokenManager`]: crate::management::TokenManager

pub mod client;
pub mod recommendations;
pub mod tracks;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{AudioFeatures, Track},
};

pub use client::SpotifyClient;
pub use recommendations::RecommendationQuery;

/// The catalog capabilities the similar-tracks resolver consumes.
///
/// [`SpotifyClient`] is the production implementation. Tests use the generated
/// `MockCatalog` (available under `cfg(test)` or the `mock` feature) or a
/// hand-written stub.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the audio-feature vector of a track.
    async fn fetch_audio_features(&self, track_id: &str) -> Result<AudioFeatures>;

    /// Fetch one batch of recommended tracks, in the order the catalog returned them.
    async fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<Vec<Track>>;
}
