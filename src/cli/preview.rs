use crate::{
    cli::{catalog, require_session},
    error, info, success, warning,
};

/// Hands the track's preview clip to the platform's default player.
pub async fn preview(track_id: String) {
    let _session = require_session().await;
    let client = catalog();

    let track = match client.fetch_track(&track_id).await {
        Ok(track) => track,
        Err(e) => error!("Cannot load track {}. Err: {}", track_id, e),
    };

    let Some(url) = track.preview_url.as_deref().filter(|_| track.is_playable()) else {
        warning!("'{}' by {} has no preview.", track.name, track.artist_name);
        return;
    };

    info!("Playing '{}' by {}", track.name, track.artist_name);
    if webbrowser::open(url).is_err() {
        warning!(
            "Failed to open a player. Please open the following URL manually:\n{}",
            url
        );
        return;
    }
    success!("Preview opened.");
}
