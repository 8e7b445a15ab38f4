mod auth;
mod session;

pub use auth::TokenManager;
pub use auth::is_expired_at;
pub use session::SessionManager;
