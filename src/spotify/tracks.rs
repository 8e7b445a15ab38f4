use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{ApiTrack, PlaylistTracksResponse, SearchResponse, Track},
};

impl SpotifyClient {
    /// Retrieves the tracks of the configured popular playlist.
    ///
    /// Playlist entries whose track is unavailable (the API returns `null` for
    /// removed or local items) are skipped. Tracks without a preview clip are
    /// returned as well; callers filter with [`crate::utils::playable_tracks`].
    ///
    /// # API Endpoint
    ///
    /// `GET /playlists/{playlist_id}/tracks`
    pub async fn popular_tracks(&self) -> Result<Vec<Track>> {
        let path = format!("/playlists/{}/tracks", self.popular_playlist_id());
        let res: PlaylistTracksResponse = self.get_json(&path, &[]).await?;

        let tracks: Vec<Track> = res
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .map(Track::from)
            .collect();

        log::info!("Fetched {} popular tracks", tracks.len());
        Ok(tracks)
    }

    /// Searches the catalog for tracks matching `keyword`.
    ///
    /// # API Endpoint
    ///
    /// `GET /search?q={keyword}&type=track`
    pub async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>> {
        let res: SearchResponse = self
            .get_json(
                "/search",
                &[("q", keyword.to_string()), ("type", "track".to_string())],
            )
            .await?;

        let tracks: Vec<Track> = res.tracks.items.into_iter().map(Track::from).collect();
        log::info!("Search for '{}' returned {} tracks", keyword, tracks.len());
        Ok(tracks)
    }

    pub async fn fetch_track(&self, track_id: &str) -> Result<Track> {
        let path = format!("/tracks/{}", track_id);
        let track: ApiTrack = self.get_json(&path, &[]).await?;
        Ok(Track::from(track))
    }
}
