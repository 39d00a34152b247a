//! SQLite persistence layer for the game collection.
//!
//! Provides schema creation, CRUD operations, and the read queries behind
//! [`SqliteStore`], the SQLite implementation of `shelf_lib::RecordStore`.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{delete_game, get_game, insert_game, replace_game, OperationError};
pub use queries::{compile_where, count_games, find_games, order_by};
pub use schema::{open_database, open_memory, SchemaError};
pub use store::SqliteStore;
