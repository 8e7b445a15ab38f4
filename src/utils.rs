use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{Track, TrackTableRow};

/// Builds the `Authorization` header value for the client-credentials grant.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", credentials)
}

/// Keeps only tracks that carry a preview clip.
pub fn playable_tracks(tracks: Vec<Track>) -> Vec<Track> {
    tracks.into_iter().filter(Track::is_playable).collect()
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks.iter().map(TrackTableRow::from).collect()
}

/// Blank or whitespace-only keywords mean "no search".
pub fn normalize_keyword(keyword: &str) -> Option<&str> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
