use super::*;
use crate::lyrics::LyricsLine;

fn t(id: &str) -> Track {
    Track {
        id: id.into(),
        title: format!("Title {id}"),
        artist: String::new(),
        album: String::new(),
        cover: String::new(),
        duration: 100,
        audio_url: None,
        lyrics: Vec::new(),
    }
}

#[test]
fn builtin_catalog_has_six_playable_tracks_and_two_favorites() {
    let c = Catalog::builtin();
    assert_eq!(c.len(), 6);
    assert!(c.tracks().iter().all(Track::has_audio));
    assert_eq!(c.playlists().len(), 3);
    assert_eq!(c.initial_favorites(), ["1".to_string(), "3".to_string()]);
    assert_eq!(c.get(3).map(|t| t.id.as_str()), Some("4"));
}

#[test]
fn new_rejects_duplicate_ids() {
    let err = Catalog::new(vec![t("a"), t("b"), t("a")], Vec::new(), Vec::new()).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
}

#[test]
fn new_drops_favorites_for_unknown_tracks() {
    let c = Catalog::new(vec![t("a")], Vec::new(), vec!["a".into(), "zzz".into()]).unwrap();
    assert_eq!(c.initial_favorites(), ["a".to_string()]);
}

#[test]
fn from_toml_str_reads_tracks_lyrics_and_playlists() {
    let c = Catalog::from_toml_str(
        r#"
favorites = ["x"]

[[tracks]]
id = "x"
title = "Intro"
artist = "Band"
duration = 61
audio_url = "/music/intro.mp3"
lyrics = [{ time = 20.0, text = "b" }, { time = 10.0, text = "a" }]

[[tracks]]
id = "y"
title = "Silent"

[[playlists]]
id = "p"
name = "Mix"
track_count = 2
"#,
    )
    .unwrap();

    assert_eq!(c.len(), 2);
    let x = c.get(0).unwrap();
    assert_eq!(x.display(), "Band - Intro");
    assert_eq!(x.duration, 61);
    assert_eq!(
        x.lyrics,
        vec![
            LyricsLine {
                time: 10.0,
                text: "a".into()
            },
            LyricsLine {
                time: 20.0,
                text: "b".into()
            },
        ]
    );

    let y = c.get(1).unwrap();
    assert_eq!(y.display(), "Silent");
    assert!(!y.has_audio());
    assert_eq!(y.duration, 0);

    assert_eq!(c.playlists()[0].track_count, 2);
    assert_eq!(c.initial_favorites(), ["x".to_string()]);
}

#[test]
fn from_toml_str_reports_parse_errors() {
    let err = Catalog::from_toml_str("[[tracks]]\nid = 3\n").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn open_falls_back_to_builtin_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let c = Catalog::open(Some(&missing), &LibrarySettings::default());
    assert_eq!(c.len(), Catalog::builtin().len());
}

#[test]
fn open_scans_directories() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.mp3"), b"x").unwrap();
    let c = Catalog::open(Some(dir.path()), &LibrarySettings::default());
    assert_eq!(c.len(), 1);
    assert!(c.playlists().is_empty());
}
