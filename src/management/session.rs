use std::path::PathBuf;

use chrono::Utc;

use crate::{config, error::Result, types::Session};

pub struct SessionManager {
    path: PathBuf,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Self::session_path())
    }
}

impl SessionManager {
    pub fn new(path: PathBuf) -> Self {
        SessionManager { path }
    }

    /// Returns `Ok(None)` when nobody has signed in on this machine.
    pub async fn load(&self) -> Result<Option<Session>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = async_fs::read_to_string(&self.path).await?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    pub async fn persist(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(session)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        if self.path.is_file() {
            async_fs::remove_file(&self.path).await?;
        }
        Ok(())
    }

    pub fn is_expired(session: &Session) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= session.obtained_at + session.expires_in.saturating_sub(60)
    }

    fn session_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/session.json");
        path
    }
}
