//! The record store interface shared by every storage backend.
//!
//! Engines and mutation paths only ever talk to a [`RecordStore`]. Selection
//! criteria reach the store as a compiled [`Predicate`], whose
//! [`Predicate::matches`] is the reference semantics every adapter follows.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use shelf_catalog::{Game, GameId, GameInput, GroupCount, SortField, SortOrder};
use thiserror::Error;

/// Errors surfaced by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record has the given id
    #[error("Game not found: {0}")]
    NotFound(GameId),

    /// Backend failure (connectivity, I/O, corruption); opaque to callers
    #[error("Store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Case-insensitive substring containment.
///
/// Every adapter folds case through this function so that selection
/// results do not depend on the backend.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ── Predicates ──────────────────────────────────────────────────────────────

/// One conjunct of a selection predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Game has at least one of these genres (exact match).
    GenreIn(Vec<String>),
    /// Game is on at least one of these platforms (exact match).
    PlatformIn(Vec<String>),
    Completed(bool),
    Favorite(bool),
    /// Publisher contains the text, ignoring case.
    PublisherContains(String),
    /// Title, developer or publisher contains the text, ignoring case.
    Search(String),
}

impl Clause {
    pub fn matches(&self, game: &Game) -> bool {
        match self {
            Self::GenreIn(wanted) => game.genres.iter().any(|g| wanted.contains(g)),
            Self::PlatformIn(wanted) => game.platforms.iter().any(|p| wanted.contains(p)),
            Self::Completed(value) => game.completed == *value,
            Self::Favorite(value) => game.favorite == *value,
            Self::PublisherContains(text) => contains_ignore_case(&game.publisher, text),
            Self::Search(text) => {
                contains_ignore_case(&game.title, text)
                    || contains_ignore_case(&game.developer, text)
                    || contains_ignore_case(&game.publisher, text)
            }
        }
    }
}

/// A conjunction of clauses. The empty conjunction matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The predicate that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, game: &Game) -> bool {
        self.clauses.iter().all(|c| c.matches(game))
    }
}

// ── Ordering ────────────────────────────────────────────────────────────────

/// Primary ordering of a selection. Ties keep the store's natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortKey {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Compare two games on this key.
    ///
    /// A missing Metacritic score is lower than any score, so it sorts
    /// last when descending and first when ascending.
    pub fn compare(&self, a: &Game, b: &Game) -> Ordering {
        let ordering = match self.field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Publisher => a.publisher.cmp(&b.publisher),
            SortField::Developer => a.developer.cmp(&b.developer),
            SortField::ReleaseYear => a.release_year.cmp(&b.release_year),
            SortField::MetacriticScore => a.metacritic_score.cmp(&b.metacritic_score),
            SortField::PlayHours => a
                .play_hours
                .partial_cmp(&b.play_hours)
                .unwrap_or(Ordering::Equal),
            SortField::Completed => a.completed.cmp(&b.completed),
            SortField::Favorite => a.favorite.cmp(&b.favorite),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

// ── Fields ──────────────────────────────────────────────────────────────────

/// Text-valued fields whose distinct values can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Genre,
    Platform,
    Publisher,
    Developer,
}

impl TextField {
    pub fn values<'a>(&self, game: &'a Game) -> Vec<&'a str> {
        match self {
            Self::Genre => game.genres.iter().map(String::as_str).collect(),
            Self::Platform => game.platforms.iter().map(String::as_str).collect(),
            Self::Publisher => vec![game.publisher.as_str()],
            Self::Developer => vec![game.developer.as_str()],
        }
    }
}

/// Fields a collection can be grouped and counted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupField {
    Genre,
    Platform,
    ReleaseYear,
}

impl GroupField {
    /// Fan a record out into the group keys it contributes to, one per member.
    pub fn keys(&self, game: &Game) -> Vec<GroupKey> {
        match self {
            Self::Genre => game.genres.iter().cloned().map(GroupKey::Text).collect(),
            Self::Platform => game.platforms.iter().cloned().map(GroupKey::Text).collect(),
            Self::ReleaseYear => vec![GroupKey::Year(game.release_year)],
        }
    }
}

/// Key of one group produced by [`RecordStore::group_count`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Text(String),
    Year(i32),
}

/// Numeric fields that can be summed or averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    PlayHours,
    MetacriticScore,
}

impl NumericField {
    /// The field's value, or `None` when the record has no value for it.
    pub fn value(&self, game: &Game) -> Option<f64> {
        match self {
            Self::PlayHours => Some(game.play_hours),
            Self::MetacriticScore => game.metacritic_score.map(f64::from),
        }
    }
}

// ── Store ───────────────────────────────────────────────────────────────────

/// Storage collaborator for the collection.
///
/// Implementations provide read-after-write consistency for one caller's
/// sequential operations. No cross-call atomicity is promised: two reads
/// may observe different states under concurrent writes.
pub trait RecordStore: Send + Sync {
    /// Records matching `predicate`, ordered by `sort` then natural order.
    fn find(&self, predicate: &Predicate, sort: SortKey) -> Result<Vec<Game>, StoreError>;

    fn count(&self, predicate: &Predicate) -> Result<u64, StoreError>;

    /// Unique values of `field`, in no particular order.
    fn distinct_values(&self, field: TextField) -> Result<Vec<String>, StoreError>;

    /// One group per distinct key with one increment per record per member.
    ///
    /// Groups come back in the store's natural order, unsorted.
    fn group_count(&self, field: GroupField) -> Result<Vec<GroupCount<GroupKey>>, StoreError>;

    /// Sum of `field` over all records; 0 when empty.
    fn sum(&self, field: NumericField) -> Result<f64, StoreError>;

    /// Mean of `field` over records that have a value; `None` when none do.
    fn average(&self, field: NumericField) -> Result<Option<f64>, StoreError>;

    fn get(&self, id: &GameId) -> Result<Option<Game>, StoreError>;

    /// Persist a new record stamped at `at`. The store assigns the id.
    fn insert(&self, input: GameInput, at: DateTime<Utc>) -> Result<Game, StoreError>;

    /// Overwrite the record with `game.id`, atomically.
    fn replace(&self, game: &Game) -> Result<(), StoreError>;

    /// Hard-delete the record, returning what was removed.
    fn delete(&self, id: &GameId) -> Result<Game, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn find(&self, predicate: &Predicate, sort: SortKey) -> Result<Vec<Game>, StoreError> {
        (**self).find(predicate, sort)
    }

    fn count(&self, predicate: &Predicate) -> Result<u64, StoreError> {
        (**self).count(predicate)
    }

    fn distinct_values(&self, field: TextField) -> Result<Vec<String>, StoreError> {
        (**self).distinct_values(field)
    }

    fn group_count(&self, field: GroupField) -> Result<Vec<GroupCount<GroupKey>>, StoreError> {
        (**self).group_count(field)
    }

    fn sum(&self, field: NumericField) -> Result<f64, StoreError> {
        (**self).sum(field)
    }

    fn average(&self, field: NumericField) -> Result<Option<f64>, StoreError> {
        (**self).average(field)
    }

    fn get(&self, id: &GameId) -> Result<Option<Game>, StoreError> {
        (**self).get(id)
    }

    fn insert(&self, input: GameInput, at: DateTime<Utc>) -> Result<Game, StoreError> {
        (**self).insert(input, at)
    }

    fn replace(&self, game: &Game) -> Result<(), StoreError> {
        (**self).replace(game)
    }

    fn delete(&self, id: &GameId) -> Result<Game, StoreError> {
        (**self).delete(id)
    }
}
