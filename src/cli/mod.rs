//! # CLI Module
//!
//! The user-facing commands of songscout. Each command wires configuration, the
//! session context and the catalog client together, shows progress while it waits
//! on the network, and renders the outcome as a table or a status line.
//!
//! ## Commands
//!
//! ### Account
//!
//! - [`sign_up`] - register a new account and sign in
//! - [`sign_in`] - sign in with email and password
//! - [`sign_out`] - end the stored session
//! - [`whoami`] - show the signed-in user
//!
//! ### Discovery (signed-in users only)
//!
//! - [`popular`] - tracks of the popular playlist that have a preview
//! - [`search`] - tracks matching a keyword that have a preview
//! - [`similar`] - up to five previewable tracks similar to a seed track
//! - [`preview`] - open a track's preview clip in the default player
//!
//! ## Error Presentation
//!
//! Library errors are turned into coloured status lines here and nowhere else.
//! Unrecoverable ones (missing configuration, no session) end the process with
//! exit code 1 through the [`error!`](crate::error!) macro.

mod auth;
mod preview;
mod similar;
mod tracks;

pub use auth::sign_in;
pub use auth::sign_out;
pub use auth::sign_up;
pub use auth::whoami;
pub use preview::preview;
pub use similar::similar;
pub use tracks::popular;
pub use tracks::search;

use crate::{error, session::SessionContext, spotify::SpotifyClient, supabase::SupabaseAuth};

fn identity() -> SupabaseAuth {
    match SupabaseAuth::from_env() {
        Ok(identity) => identity,
        Err(e) => error!("Cannot set up the identity service. Err: {}", e),
    }
}

fn catalog() -> SpotifyClient {
    match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot set up the catalog client. Err: {}", e),
    }
}

/// Restores the session and stops unless somebody is signed in.
async fn require_session() -> SessionContext {
    let identity = identity();
    let session = match SessionContext::initialize(&identity).await {
        Ok(session) => session,
        Err(e) => error!("Failed to restore session. Err: {}", e),
    };

    if let Err(e) = session.require_user() {
        error!("{}", e);
    }
    session
}
