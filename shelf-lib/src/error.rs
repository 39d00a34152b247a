use shelf_catalog::{GameId, Violation};
use thiserror::Error;

use crate::store::StoreError;

/// Errors from the collection's mutation and lookup paths.
///
/// Exactly one variant is reported per failed call, and a failed call
/// leaves no partial change behind.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The payload breaks one or more record invariants
    #[error("Validation failed: {}", format_violations(.0))]
    Validation(Vec<Violation>),

    /// No game has the given id
    #[error("Game not found: {0}")]
    NotFound(GameId),

    /// The record store failed
    #[error("Store error: {0}")]
    Store(String),
}

impl CollectionError {
    /// Field-level detail, when this is a validation failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(v) => v,
            _ => &[],
        }
    }
}

impl From<StoreError> for CollectionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
