use songscout::types::Track;
use songscout::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, preview_url: Option<&str>) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        preview_url: preview_url.map(str::to_string),
        album_image_url: format!("https://i.scdn.co/image/{}", id),
        artist_name: format!("{} artist", name),
    }
}

#[test]
fn test_basic_auth_header() {
    let header = basic_auth_header("client", "secret");

    // base64("client:secret")
    assert_eq!(header, "Basic Y2xpZW50OnNlY3JldA==");

    // Different credentials produce a different header
    assert_ne!(header, basic_auth_header("client", "other"));
}

#[test]
fn test_playable_tracks_filters_missing_and_blank_previews() {
    let tracks = vec![
        create_test_track("1", "With preview", Some("https://p.scdn.co/1")),
        create_test_track("2", "No preview", None),
        create_test_track("3", "Empty preview", Some("")),
        create_test_track("4", "Blank preview", Some("   ")),
        create_test_track("5", "Another", Some("https://p.scdn.co/5")),
    ];

    let playable = playable_tracks(tracks);

    let ids: Vec<&str> = playable.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "5"]);
}

#[test]
fn test_normalize_keyword() {
    assert_eq!(normalize_keyword("  daft punk "), Some("daft punk"));
    assert_eq!(normalize_keyword("abba"), Some("abba"));
    assert_eq!(normalize_keyword(""), None);
    assert_eq!(normalize_keyword(" \t\n"), None);
}

#[test]
fn test_track_table_rows() {
    let tracks = vec![
        create_test_track("1", "Song", Some("https://p.scdn.co/1")),
        create_test_track("2", "Silent", None),
    ];

    let rows = track_table_rows(&tracks);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "1");
    assert_eq!(rows[0].name, "Song");
    assert_eq!(rows[0].artist, "Song artist");
    assert_eq!(rows[0].preview, "yes");
    assert_eq!(rows[1].preview, "no");
}
