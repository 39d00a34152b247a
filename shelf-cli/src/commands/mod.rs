pub(crate) mod config;
pub(crate) mod games;
pub(crate) mod stats;
pub(crate) mod transfer;

use std::path::PathBuf;

use serde::Serialize;
use shelf_db::SqliteStore;
use shelf_lib::settings::resolve_database_path;
use shelf_lib::{Collection, MemoryStore, RecordStore};

use crate::CliError;

/// The collection every command works on, whichever store backs it.
pub(crate) type Shelf = Collection<Box<dyn RecordStore>>;

/// Open the configured collection, or an empty in-memory one.
pub(crate) fn open_collection(db: Option<PathBuf>, memory: bool) -> Result<Shelf, CliError> {
    let store: Box<dyn RecordStore> = if memory {
        log::debug!("Using an in-memory collection; nothing will be saved");
        Box::new(MemoryStore::new())
    } else {
        let path = resolve_database_path(db);
        let store = SqliteStore::open(&path).map_err(|e| {
            CliError::database(format!(
                "Failed to open collection database {}: {}",
                path.display(),
                e
            ))
        })?;
        Box::new(store)
    };
    Ok(Collection::new(store))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}
