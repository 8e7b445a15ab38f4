use tabled::Table;

use crate::{
    cli::{catalog, require_session},
    error, info,
    types::Track,
    utils, warning,
};

pub async fn popular() {
    let _session = require_session().await;
    let client = catalog();

    let pb = utils::spinner("Fetching popular tracks...");
    let res = client.popular_tracks().await;
    pb.finish_and_clear();

    match res {
        Ok(tracks) => render("Popular tracks", utils::playable_tracks(tracks)),
        Err(e) => error!("Failed to fetch popular tracks. Err: {}", e),
    }
}

/// Searches the catalog; a blank keyword shows the popular tracks instead.
pub async fn search(keyword: String) {
    let Some(keyword) = utils::normalize_keyword(&keyword) else {
        return popular().await;
    };

    let _session = require_session().await;
    let client = catalog();

    let pb = utils::spinner(&format!("Searching for '{}'...", keyword));
    let res = client.search_tracks(keyword).await;
    pb.finish_and_clear();

    match res {
        Ok(tracks) => render("Search results", utils::playable_tracks(tracks)),
        Err(e) => error!("Search failed. Err: {}", e),
    }
}

fn render(title: &str, tracks: Vec<Track>) {
    if tracks.is_empty() {
        warning!("No tracks with a preview found.");
        return;
    }

    info!("{} ({})", title, tracks.len());
    println!("{}", Table::new(utils::track_table_rows(&tracks)));
}
