//! [`RecordStore`] adapter over a SQLite connection.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::Connection;
use shelf_catalog::{Game, GameId, GameInput, GroupCount};
use shelf_lib::{
    GroupField, GroupKey, NumericField, Predicate, RecordStore, SortKey, StoreError, TextField,
};

use crate::operations;
use crate::queries;
use crate::schema::{self, SchemaError};

/// SQLite-backed record store. The connection is serialized behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating or migrating as needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        log::debug!("Opening collection database at {}", path.display());
        Ok(Self::from_connection(schema::open_database(path)?))
    }

    /// A fresh in-memory database.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self::from_connection(schema::open_memory()?))
    }

    /// Wrap a connection that already has the schema and SQL functions installed.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::backend("connection lock poisoned"))
    }
}

impl RecordStore for SqliteStore {
    fn find(&self, predicate: &Predicate, sort: SortKey) -> Result<Vec<Game>, StoreError> {
        let conn = self.lock()?;
        Ok(queries::find_games(&conn, predicate, sort)?)
    }

    fn count(&self, predicate: &Predicate) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        Ok(queries::count_games(&conn, predicate)?)
    }

    fn distinct_values(&self, field: TextField) -> Result<Vec<String>, StoreError> {
        let conn = self.lock()?;
        Ok(queries::distinct_values(&conn, field)?)
    }

    fn group_count(&self, field: GroupField) -> Result<Vec<GroupCount<GroupKey>>, StoreError> {
        let conn = self.lock()?;
        Ok(queries::group_count(&conn, field)?)
    }

    fn sum(&self, field: NumericField) -> Result<f64, StoreError> {
        let conn = self.lock()?;
        Ok(queries::sum(&conn, field)?)
    }

    fn average(&self, field: NumericField) -> Result<Option<f64>, StoreError> {
        let conn = self.lock()?;
        Ok(queries::average(&conn, field)?)
    }

    fn get(&self, id: &GameId) -> Result<Option<Game>, StoreError> {
        let conn = self.lock()?;
        Ok(operations::get_game(&conn, id)?)
    }

    fn insert(&self, input: GameInput, at: DateTime<Utc>) -> Result<Game, StoreError> {
        let game = Game::from_input(GameId::generate(), input, at.trunc_subsecs(6));
        let conn = self.lock()?;
        operations::insert_game(&conn, &game)?;
        Ok(game)
    }

    fn replace(&self, game: &Game) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Ok(operations::replace_game(&conn, game)?)
    }

    fn delete(&self, id: &GameId) -> Result<Game, StoreError> {
        let conn = self.lock()?;
        Ok(operations::delete_game(&conn, id)?)
    }
}
