//! # Identity Module
//!
//! Sign-up, sign-in, sign-out and "who is signed in" are delegated to a hosted
//! Supabase project. This module talks to its GoTrue REST endpoints; it does not
//! implement any part of the authentication protocol itself.
//!
//! ## Endpoints
//!
//! - `POST /auth/v1/signup` - register with email, password and display name
//! - `POST /auth/v1/token?grant_type=password` - sign in
//! - `POST /auth/v1/token?grant_type=refresh_token` - renew an expired session
//! - `POST /auth/v1/logout` - revoke the session
//!
//! Every request carries the project's public `apikey` header. Sessions are
//! stored locally by [`SessionManager`](crate::management::SessionManager) so a
//! sign-in survives between invocations.

pub mod auth;

use async_trait::async_trait;

use crate::{error::Result, types::User};

pub use auth::SupabaseAuth;

/// Operations of the external identity collaborator.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Identity: Send + Sync {
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    /// The user of the stored session, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<User>>;

    async fn sign_out(&self) -> Result<()>;
}
