use thiserror::Error;

/// Errors produced by songscout.
///
/// Remote failures of any kind (transport errors, non-success statuses,
/// malformed payloads and timeouts) collapse into [`Error::Upstream`]; the
/// caller decides whether to surface them and offer a manual retry.
#[derive(Error, Debug)]
pub enum Error {
    /// A remote service could not be reached, answered with a non-success
    /// status, returned a payload that did not parse, or timed out.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The request was abandoned because a newer one replaced it.
    #[error("Request cancelled")]
    Cancelled,

    /// The identity service rejected the operation.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not signed in. Run `songscout signin` first.")]
    NotSignedIn,

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The persisted session could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Error::Upstream(format!("malformed response: {}", err));
        }
        Error::Upstream(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
