use std::sync::Arc;

use tabled::Table;

use crate::{
    cli::{catalog, require_session},
    config, error, info,
    resolver::{MAX_SIMILAR_TRACKS, SimilarTracksResolver},
    utils, warning,
};

pub async fn similar(track_id: String) {
    let _session = require_session().await;
    let client = Arc::new(catalog());

    let timeout = match config::request_timeout() {
        Ok(timeout) => timeout,
        Err(e) => error!("{}", e),
    };

    let seed_name = match client.fetch_track(&track_id).await {
        Ok(seed) => seed.name,
        Err(e) => error!("Cannot load track {}. Err: {}", track_id, e),
    };

    let resolver = SimilarTracksResolver::new(client, timeout);
    let pb = utils::spinner(&format!("Looking for tracks similar to '{}'...", seed_name));
    let res = resolver.resolve(&track_id).await;
    pb.finish_and_clear();

    let similar = match res {
        Ok(similar) => similar,
        Err(e) => error!("Failed to fetch similar tracks. Err: {}\nPlease try again.", e),
    };

    if similar.is_empty() {
        warning!("No similar tracks with a preview found for '{}'.", seed_name);
        return;
    }

    info!("Tracks similar to '{}'", seed_name);
    println!("{}", Table::new(utils::track_table_rows(similar.tracks())));

    if similar.len() < MAX_SIMILAR_TRACKS {
        warning!(
            "Only {} of {} similar tracks have a preview.",
            similar.len(),
            MAX_SIMILAR_TRACKS
        );
    }
}
