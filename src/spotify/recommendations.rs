use async_trait::async_trait;

use crate::{
    error::Result,
    spotify::{Catalog, SpotifyClient},
    types::{AudioFeatures, RecommendationsResponse, Track},
};

/// Number of tracks requested per recommendation batch.
pub const RECOMMENDATION_LIMIT: u32 = 20;

/// Minimum popularity every recommendation request asks for.
pub const MIN_POPULARITY: u32 = 50;

/// Parameters of one `GET /recommendations` request.
///
/// The seed track seeds the request and its audio features become the
/// `target_*` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub seed_track_id: String,
    pub features: AudioFeatures,
    pub limit: u32,
    pub min_popularity: u32,
}

impl RecommendationQuery {
    pub fn new(seed_track_id: &str, features: AudioFeatures) -> Self {
        Self {
            seed_track_id: seed_track_id.to_string(),
            features,
            limit: RECOMMENDATION_LIMIT,
            min_popularity: MIN_POPULARITY,
        }
    }

    pub fn with_min_popularity(mut self, min_popularity: u32) -> Self {
        self.min_popularity = min_popularity;
        self
    }

    /// Query-string parameters in the order the API documents them.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("seed_tracks", self.seed_track_id.clone()),
            ("target_liveness", self.features.liveness.to_string()),
            ("target_valence", self.features.valence.to_string()),
            ("target_energy", self.features.energy.to_string()),
            ("target_tempo", self.features.tempo.to_string()),
            ("min_popularity", self.min_popularity.to_string()),
        ]
    }
}

#[async_trait]
impl Catalog for SpotifyClient {
    /// `GET /audio-features/{id}`
    async fn fetch_audio_features(&self, track_id: &str) -> Result<AudioFeatures> {
        let path = format!("/audio-features/{}", track_id);
        self.get_json(&path, &[]).await
    }

    /// `GET /recommendations` with the parameters of [`RecommendationQuery::to_params`].
    async fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<Vec<Track>> {
        let res: RecommendationsResponse =
            self.get_json("/recommendations", &query.to_params()).await?;

        log::debug!(
            "Recommendations for {} returned {} tracks",
            query.seed_track_id,
            res.tracks.len()
        );
        Ok(res.tracks.into_iter().map(Track::from).collect())
    }
}
