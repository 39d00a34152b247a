use std::fs;
use std::path::Path;

use chrono::Utc;
use shelf_catalog::*;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_games_from_yaml() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        tmp.path(),
        "seed.yaml",
        r#"
- title: "The Legend of Zelda"
  genres: [Action, Adventure]
  platforms: [NES]
  publisher: Nintendo
  developer: Nintendo EAD
  release_year: 1986
  metacritic_score: 84
  favorite: true
- title: "Sonic the Hedgehog"
  genres: [Platform]
  platforms: [Genesis]
  publisher: Sega
  developer: Sonic Team
  release_year: 1991
"#,
    );

    let games = load_seed(&path).unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].genres, vec!["Action", "Adventure"]);
    assert_eq!(games[0].metacritic_score, Some(84));
    assert!(games[0].favorite);
    assert_eq!(games[1].metacritic_score, None);
    assert_eq!(games[1].play_hours, 0.0);
}

#[test]
fn export_round_trips_through_json_seed() {
    let tmp = TempDir::new().unwrap();
    let input = GameInput {
        title: "Metroid".to_string(),
        genres: vec!["Action".to_string()],
        platforms: vec!["NES".to_string()],
        publisher: "Nintendo".to_string(),
        developer: "Nintendo R&D1".to_string(),
        release_year: 1986,
        metacritic_score: None,
        play_hours: 12.0,
        completed: true,
        favorite: false,
    };
    let game = Game::from_input(GameId::generate(), input.clone(), Utc::now());
    let doc = ExportDocument::new(vec![game], Utc::now());
    assert_eq!(doc.total_games, 1);

    let path = tmp.path().join("out").join("games_export.json");
    write_export(&doc, &path).unwrap();
    assert!(path.exists());

    let games = load_seed(&path).unwrap();
    assert_eq!(games, vec![input]);
}

#[test]
fn bare_json_list_is_accepted() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        tmp.path(),
        "list.json",
        r#"[{"title": "Doom", "genres": ["Shooter"], "platforms": ["PC"],
             "publisher": "id Software", "developer": "id Software", "release_year": 1993}]"#,
    );
    let games = load_seed(&path).unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].title, "Doom");
}

#[test]
fn unknown_extension_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(tmp.path(), "seed.csv", "title\n");
    assert!(matches!(load_seed(&path), Err(SeedError::UnsupportedFormat(_))));
}

#[test]
fn missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let result = load_seed(&tmp.path().join("nope.yaml"));
    assert!(matches!(result, Err(SeedError::Io { .. })));
}
