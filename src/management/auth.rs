use chrono::Utc;
use reqwest::Client;

use crate::{
    error::{Error, Result},
    types::{Token, TokenResponse},
    utils,
};

/// Seconds before the real expiry at which a token is already treated as stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(http: Client, token_url: String, client_id: String, client_secret: String) -> Self {
        TokenManager {
            http,
            token_url,
            client_id,
            client_secret,
            token: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub async fn get_valid_token(&mut self) -> Result<String> {
        let now = Utc::now().timestamp() as u64;
        if let Some(token) = self.token.as_ref().filter(|t| !is_expired_at(t, now)) {
            return Ok(token.access_token.clone());
        }

        log::debug!("Catalog token missing or stale, requesting a new one");
        let token = self.request_token().await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    async fn request_token(&self) -> Result<Token> {
        let res = self
            .http
            .post(&self.token_url)
            .header(
                "Authorization",
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "token request failed: {} - {}",
                status, body
            )));
        }

        let body: TokenResponse = res.json().await?;
        Ok(Token {
            access_token: body.access_token,
            token_type: body.token_type,
            expires_in: body.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

pub fn is_expired_at(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}
