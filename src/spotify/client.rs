use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    config::CatalogSettings,
    error::{Error, Result},
    management::TokenManager,
};

/// HTTP client for the Spotify Web API.
///
/// Holds one `reqwest` connection pool and the client-credentials token cache.
/// The cache sits behind an async mutex so concurrent callers share a single
/// token request when it has to be renewed.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    popular_playlist_id: String,
    token: Mutex<TokenManager>,
}

impl SpotifyClient {
    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(settings: CatalogSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("cannot build HTTP client: {}", e)))?;

        let token = TokenManager::new(
            http.clone(),
            settings.token_url,
            settings.client_id,
            settings.client_secret,
        );

        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            popular_playlist_id: settings.popular_playlist_id,
            token: Mutex::new(token),
        })
    }

    /// Creates a client from the environment, see [`CatalogSettings::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(CatalogSettings::from_env()?)
    }

    pub(crate) fn popular_playlist_id(&self) -> &str {
        &self.popular_playlist_id
    }

    /// Issues an authenticated `GET {api_url}{path}` and decodes the JSON body.
    ///
    /// Non-success statuses are turned into [`Error::Upstream`] carrying the
    /// status and the response body; undecodable bodies are reported as
    /// malformed responses.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let token = self.token.lock().await.get_valid_token().await?;
        let url = format!("{}{}", self.api_url, path);

        log::debug!("GET {} {:?}", url, query);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "{} returned status {}: {}",
                path, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Upstream(format!("malformed response from {}: {}", path, e)))
    }
}
