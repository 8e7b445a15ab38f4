use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub preview_url: Option<String>,
    pub album_image_url: String,
    pub artist_name: String,
}

impl Track {
    /// A track is playable when the catalog returned a non-empty preview clip URL.
    pub fn is_playable(&self) -> bool {
        self.preview_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub liveness: f64,
    pub valence: f64,
    pub energy: f64,
    pub tempo: f64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub preview: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        TrackTableRow {
            id: track.id.clone(),
            name: track.name.clone(),
            artist: track.artist_name.clone(),
            preview: if track.is_playable() { "yes" } else { "no" }.to_string(),
        }
    }
}

// Catalog wire format

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTrack {
    pub id: String,
    pub name: String,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub album: Option<ApiAlbum>,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAlbum {
    #[serde(default)]
    pub images: Vec<ApiImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiArtist {
    pub name: String,
}

impl From<ApiTrack> for Track {
    fn from(t: ApiTrack) -> Track {
        let album_image_url = t
            .album
            .and_then(|album| album.images.into_iter().next())
            .map(|image| image.url)
            .unwrap_or_default();
        let artist_name = t
            .artists
            .into_iter()
            .next()
            .map(|artist| artist.name)
            .unwrap_or_default();

        Track {
            id: t.id,
            name: t.name,
            preview_url: t.preview_url,
            album_image_url,
            artist_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub items: Vec<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

// Identity

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub user_name: String,
}

#[derive(Tabled)]
pub struct UserTableRow {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserTableRow {
    fn from(user: &User) -> Self {
        UserTableRow {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.user_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: ApiUserMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<ApiUser> for User {
    fn from(u: ApiUser) -> User {
        User {
            id: u.id,
            email: u.email.unwrap_or_default(),
            user_name: u.user_metadata.name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: ApiUser,
}

/// Sign-up answers with a full session when the project auto-confirms new
/// users, and with the bare user while an email confirmation is pending.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(ApiSession),
    User(ApiUser),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}
