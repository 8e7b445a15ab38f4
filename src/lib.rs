//! songscout: music discovery on top of the Spotify catalog.
//!
//! The library signs users in against a hosted identity service, lists popular
//! and searched tracks that carry a playable preview, and resolves a short list
//! of tracks similar to a seed track by matching its audio features.
//!
//! # Modules
//!
//! - `cancel` - cancellation and per-call timeouts for catalog requests
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The crate-wide error type
//! - `management` - Token and session caches
//! - `resolver` - The staged similar-tracks resolution
//! - `session` - The signed-in user of the running process
//! - `spotify` - Spotify Web API client implementation
//! - `supabase` - Identity service client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod resolver;
pub mod session;
pub mod spotify;
pub mod supabase;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Prints a status line with a blue `o` marker.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green check mark for a completed operation.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red error line and exits the process with code 1.
///
/// The expansion diverges, so the macro can stand in any expression position,
/// e.g. as the `Err` arm of a `match` that otherwise yields a value:
///
/// ```
/// let client = match SpotifyClient::from_env() {
///     Ok(client) => client,
///     Err(e) => error!("Cannot set up the catalog client. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow warning line for something the user should notice but
/// that does not stop the command.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
