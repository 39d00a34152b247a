//! Game collection data model, validation, and seed/export I/O.
//!
//! This crate defines the records tracked by the collection without any
//! storage dependencies. Consumers can use these types directly for
//! serialization, display, or passing to a record store for persistence.

pub mod types;
pub mod validate;
pub mod yaml;

pub use types::*;
pub use validate::{current_year, validate_input, Violation, MAX_METACRITIC_SCORE, MIN_RELEASE_YEAR};
pub use yaml::{load_seed, write_export, SeedError};
