use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    config::IdentitySettings,
    error::{Error, Result},
    management::SessionManager,
    supabase::Identity,
    types::{ApiErrorBody, ApiSession, Session, SignUpResponse, User},
};

/// [`Identity`] backed by a Supabase project's GoTrue REST API.
pub struct SupabaseAuth {
    http: Client,
    url: String,
    api_key: String,
    sessions: SessionManager,
}

impl SupabaseAuth {
    pub fn new(settings: IdentitySettings, sessions: SessionManager) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
            sessions,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(IdentitySettings::from_env()?, SessionManager::default())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.endpoint(path))
            .header("apikey", &self.api_key)
    }

    async fn store(&self, session: ApiSession) -> Result<User> {
        let session = into_session(session);
        self.sessions.persist(&session).await?;
        Ok(session.user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ApiSession> {
        let res = self
            .post("/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        decode(res).await
    }
}

#[async_trait]
impl Identity for SupabaseAuth {
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let res = self
            .post("/signup")
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "name": name },
            }))
            .send()
            .await?;

        match decode::<SignUpResponse>(res).await? {
            SignUpResponse::Session(session) => self.store(session).await,
            SignUpResponse::User(user) => {
                log::info!("Sign-up for {} awaits email confirmation", email);
                Ok(User::from(user))
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let res = self
            .post("/token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let session: ApiSession = decode(res).await?;
        self.store(session).await
    }

    async fn current_user(&self) -> Result<Option<User>> {
        let Some(session) = self.sessions.load().await? else {
            return Ok(None);
        };

        if !SessionManager::is_expired(&session) {
            return Ok(Some(session.user));
        }

        log::debug!("Stored session expired, refreshing");
        let refreshed = self.refresh(&session.refresh_token).await?;
        self.store(refreshed).await.map(Some)
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.sessions.load().await? {
            let res = self
                .post("/logout")
                .bearer_auth(&session.access_token)
                .send()
                .await?;

            // An already revoked or expired session is as good as signed out.
            let status = res.status();
            if !status.is_success() && status != StatusCode::UNAUTHORIZED {
                return Err(error_from(res).await);
            }
        }

        self.sessions.clear().await
    }
}

fn into_session(session: ApiSession) -> Session {
    Session {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
        user: User::from(session.user),
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    if !res.status().is_success() {
        return Err(error_from(res).await);
    }
    res.json::<T>()
        .await
        .map_err(|e| Error::Upstream(format!("malformed identity response: {}", e)))
}

/// Client errors carry a human-readable reason from the identity service;
/// server errors are upstream failures.
async fn error_from(res: Response) -> Error {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    let message = parse_error_message(&body).unwrap_or_else(|| status.to_string());

    if status.is_client_error() {
        Error::Auth(message)
    } else {
        Error::Upstream(format!("identity service returned {}: {}", status, message))
    }
}

fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiUser;

    #[test]
    fn prefers_error_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            parse_error_message(body).as_deref(),
            Some("Invalid login credentials")
        );
    }

    #[test]
    fn falls_back_to_msg_and_error() {
        assert_eq!(
            parse_error_message(r#"{"code":422,"msg":"User already registered"}"#).as_deref(),
            Some("User already registered")
        );
        assert_eq!(
            parse_error_message(r#"{"error":"weak_password"}"#).as_deref(),
            Some("weak_password")
        );
        assert_eq!(parse_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn sign_up_response_distinguishes_session_and_pending_user() {
        let session = r#"{
            "access_token": "at", "refresh_token": "rt", "expires_in": 3600,
            "token_type": "bearer",
            "user": {"id": "u1", "email": "mika@example.com", "user_metadata": {"name": "Mika"}}
        }"#;
        let pending = r#"{"id": "u2", "email": "sora@example.com", "user_metadata": {"name": "Sora"}}"#;

        assert!(matches!(
            serde_json::from_str::<SignUpResponse>(session).unwrap(),
            SignUpResponse::Session(_)
        ));
        match serde_json::from_str::<SignUpResponse>(pending).unwrap() {
            SignUpResponse::User(user) => assert_eq!(User::from(user).user_name, "Sora"),
            other => panic!("expected pending user, got {:?}", other),
        }
    }

    #[test]
    fn session_takes_user_name_from_metadata() {
        let session = into_session(ApiSession {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_in: 3_600,
            user: ApiUser {
                id: "u1".to_string(),
                email: Some("mika@example.com".to_string()),
                user_metadata: crate::types::ApiUserMetadata {
                    name: Some("Mika".to_string()),
                },
            },
        });
        assert_eq!(session.user.user_name, "Mika");
        assert_eq!(session.user.email, "mika@example.com");
        assert!(!SessionManager::is_expired(&session));
    }
}
