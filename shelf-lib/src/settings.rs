//! Application settings (database location).
//!
//! The settings file is `~/.config/game-shelf/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/home/me/games.db"
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Canonical path to the settings file: `~/.config/game-shelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("game-shelf").join("settings.toml")
}

/// Default database location: `<data dir>/game-shelf/games.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("game-shelf").join("games.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`default_database_path`]
pub fn resolve_database_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_database_path(&settings_path()) {
        return p;
    }
    default_database_path()
}

/// Read `database.path` from a settings file, if set.
pub fn load_database_path(settings: &Path) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let path = doc.get("database")?.get("path")?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save (or clear) `database.path` in a settings file.
///
/// Other keys in the file are preserved. An unreadable or malformed file is
/// replaced.
pub fn save_database_path(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc = std::fs::read_to_string(settings)
        .ok()
        .and_then(|contents| contents.parse::<toml::Table>().ok())
        .unwrap_or_default();

    let section = doc
        .entry("database")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] in settings.toml is not a table"))?;
    match path {
        Some(p) => {
            section.insert("path".into(), p.to_string_lossy().into_owned().into());
        }
        None => {
            section.remove("path");
        }
    }

    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    if let Some(dir) = settings.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let staged = settings.with_extension("toml.tmp");
    std::fs::write(&staged, serialized)?;
    std::fs::rename(&staged, settings)
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
