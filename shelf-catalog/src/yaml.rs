//! Seed loading and export of the collection.
//!
//! Seeds are hand-written YAML lists of games, or JSON produced by
//! [`write_export`] (or a bare JSON list of games).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::types::{ExportDocument, GameInput};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yml::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Unsupported seed format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
}

/// A JSON seed is either a full export or a bare list of games.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSeed {
    Export(ExportDocument),
    List(Vec<GameInput>),
}

/// Load game payloads from a YAML or JSON seed file, chosen by extension.
///
/// Records loaded from an export keep their field values but not their ids
/// or timestamps; they are re-created as new games.
pub fn load_seed(path: &Path) -> Result<Vec<GameInput>, SeedError> {
    let display = path.display().to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = std::fs::read_to_string(path).map_err(|e| SeedError::Io {
        path: display.clone(),
        source: e,
    })?;

    match ext.as_str() {
        "yaml" | "yml" => serde_yml::from_str(&contents).map_err(|e| SeedError::Yaml {
            path: display,
            source: e,
        }),
        "json" => {
            let seed: JsonSeed =
                serde_json::from_str(&contents).map_err(|e| SeedError::Json {
                    path: display,
                    source: e,
                })?;
            Ok(match seed {
                JsonSeed::Export(doc) => doc.games.iter().map(|g| g.to_input()).collect(),
                JsonSeed::List(games) => games,
            })
        }
        _ => Err(SeedError::UnsupportedFormat(display)),
    }
}

/// Write an export document as pretty-printed JSON.
///
/// Writes to a temporary sibling first and renames it into place.
pub fn write_export(doc: &ExportDocument, path: &Path) -> Result<(), SeedError> {
    let display = path.display().to_string();
    let io_err = |e| SeedError::Io {
        path: display.clone(),
        source: e,
    };

    let serialized = serde_json::to_string_pretty(doc).map_err(|e| SeedError::Json {
        path: display.clone(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serialized).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
