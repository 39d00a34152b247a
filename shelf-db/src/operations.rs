//! CRUD operations on games.
//!
//! Every write touches the `games` row and its member tables inside one
//! transaction, so a failed write leaves nothing behind.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use shelf_catalog::{Game, GameId};
use shelf_lib::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Game not found: {0}")]
    NotFound(GameId),
}

impl From<OperationError> for StoreError {
    fn from(e: OperationError) -> Self {
        match e {
            OperationError::NotFound(id) => StoreError::NotFound(id),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Column list shared by every query that reads whole games.
pub(crate) const GAME_COLUMNS: &str = "g.id, g.title, g.publisher, g.developer, g.release_year,
     g.metacritic_score, g.play_hours, g.completed, g.favorite, g.created_at, g.updated_at";

// ── Writes ──────────────────────────────────────────────────────────────────

/// Insert a new game with its genres and platforms.
pub fn insert_game(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO games (id, title, publisher, developer, release_year, metacritic_score,
             play_hours, completed, favorite, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            game.id.as_str(),
            game.title,
            game.publisher,
            game.developer,
            game.release_year,
            game.metacritic_score,
            game.play_hours,
            game.completed,
            game.favorite,
            format_timestamp(&game.created_at),
            format_timestamp(&game.updated_at),
        ],
    )?;
    write_members(&tx, game)?;
    tx.commit()?;
    Ok(())
}

/// Overwrite every mutable column of an existing game and its members.
///
/// `created_at` and the natural-order position are left untouched.
pub fn replace_game(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(
        "UPDATE games SET
             title = ?2,
             publisher = ?3,
             developer = ?4,
             release_year = ?5,
             metacritic_score = ?6,
             play_hours = ?7,
             completed = ?8,
             favorite = ?9,
             updated_at = ?10
         WHERE id = ?1",
        params![
            game.id.as_str(),
            game.title,
            game.publisher,
            game.developer,
            game.release_year,
            game.metacritic_score,
            game.play_hours,
            game.completed,
            game.favorite,
            format_timestamp(&game.updated_at),
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound(game.id.clone()));
    }
    clear_members(&tx, &game.id)?;
    write_members(&tx, game)?;
    tx.commit()?;
    Ok(())
}

/// Delete a game and its members, returning the deleted record.
pub fn delete_game(conn: &Connection, id: &GameId) -> Result<Game, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let game = get_game(&tx, id)?.ok_or_else(|| OperationError::NotFound(id.clone()))?;
    clear_members(&tx, id)?;
    tx.execute("DELETE FROM games WHERE id = ?1", params![id.as_str()])?;
    tx.commit()?;
    Ok(game)
}

fn write_members(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    let mut genres =
        conn.prepare_cached("INSERT INTO game_genres (game_id, position, genre) VALUES (?1, ?2, ?3)")?;
    for (i, genre) in game.genres.iter().enumerate() {
        genres.execute(params![game.id.as_str(), i as i64, genre])?;
    }

    let mut platforms = conn.prepare_cached(
        "INSERT INTO game_platforms (game_id, position, platform) VALUES (?1, ?2, ?3)",
    )?;
    for (i, platform) in game.platforms.iter().enumerate() {
        platforms.execute(params![game.id.as_str(), i as i64, platform])?;
    }
    Ok(())
}

fn clear_members(conn: &Connection, id: &GameId) -> Result<(), OperationError> {
    conn.execute("DELETE FROM game_genres WHERE game_id = ?1", params![id.as_str()])?;
    conn.execute("DELETE FROM game_platforms WHERE game_id = ?1", params![id.as_str()])?;
    Ok(())
}

// ── Reads ───────────────────────────────────────────────────────────────────

/// Find a game by id.
pub fn get_game(conn: &Connection, id: &GameId) -> Result<Option<Game>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.id = ?1"))?;
    let game = stmt.query_row(params![id.as_str()], row_to_game).optional()?;
    match game {
        Some(mut game) => {
            load_members(conn, &mut game)?;
            Ok(Some(game))
        }
        None => Ok(None),
    }
}

/// Fill `genres` and `platforms` from the member tables, in stored order.
pub(crate) fn load_members(conn: &Connection, game: &mut Game) -> Result<(), OperationError> {
    let mut genres = conn.prepare_cached(
        "SELECT genre FROM game_genres WHERE game_id = ?1 ORDER BY position",
    )?;
    game.genres = genres
        .query_map(params![game.id.as_str()], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    let mut platforms = conn.prepare_cached(
        "SELECT platform FROM game_platforms WHERE game_id = ?1 ORDER BY position",
    )?;
    game.platforms = platforms
        .query_map(params![game.id.as_str()], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(())
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

/// Map a row selected with [`GAME_COLUMNS`]. Members are left empty.
pub(crate) fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    let id: String = row.get(0)?;
    Ok(Game {
        id: GameId::new(id),
        title: row.get(1)?,
        genres: Vec::new(),
        platforms: Vec::new(),
        publisher: row.get(2)?,
        developer: row.get(3)?,
        release_year: row.get(4)?,
        metacritic_score: row.get(5)?,
        play_hours: row.get(6)?,
        completed: row.get(7)?,
        favorite: row.get(8)?,
        created_at: parse_timestamp(row, 9)?,
        updated_at: parse_timestamp(row, 10)?,
    })
}

/// Fixed-width RFC 3339 with microseconds, so text order is time order.
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
