//! Data model types for the game collection.
//!
//! These types represent tracked games, the payloads that create and update
//! them, the criteria used to select them, and the aggregate shapes computed
//! over the whole collection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ── Identity ────────────────────────────────────────────────────────────────

/// Opaque, store-assigned identifier of a tracked game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random (UUID v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A tracked game as persisted by a record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    /// Never empty. Order is display order only.
    pub genres: Vec<String>,
    /// Never empty. Order is display order only.
    pub platforms: Vec<String>,
    pub publisher: String,
    pub developer: String,
    pub release_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metacritic_score: Option<i32>,
    pub play_hours: f64,
    pub completed: bool,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Build a record from (already validated) input, stamped at `at`.
    pub fn from_input(id: GameId, input: GameInput, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            genres: input.genres,
            platforms: input.platforms,
            publisher: input.publisher,
            developer: input.developer,
            release_year: input.release_year,
            metacritic_score: input.metacritic_score,
            play_hours: input.play_hours,
            completed: input.completed,
            favorite: input.favorite,
            created_at: at,
            updated_at: at,
        }
    }

    /// The creation payload that describes this record's current field values.
    pub fn to_input(&self) -> GameInput {
        GameInput {
            title: self.title.clone(),
            genres: self.genres.clone(),
            platforms: self.platforms.clone(),
            publisher: self.publisher.clone(),
            developer: self.developer.clone(),
            release_year: self.release_year,
            metacritic_score: self.metacritic_score,
            play_hours: self.play_hours,
            completed: self.completed,
            favorite: self.favorite,
        }
    }

    /// Overwrite the mutable fields with `input`, leaving identity and timestamps alone.
    pub fn assign(&mut self, input: GameInput) {
        self.title = input.title;
        self.genres = input.genres;
        self.platforms = input.platforms;
        self.publisher = input.publisher;
        self.developer = input.developer;
        self.release_year = input.release_year;
        self.metacritic_score = input.metacritic_score;
        self.play_hours = input.play_hours;
        self.completed = input.completed;
        self.favorite = input.favorite;
    }
}

/// Payload for creating a game. Optional fields take their documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInput {
    pub title: String,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub publisher: String,
    pub developer: String,
    pub release_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metacritic_score: Option<i32>,
    #[serde(default)]
    pub play_hours: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub favorite: bool,
}

/// Partial update payload. `None` leaves a field untouched.
///
/// `metacritic_score` is a double option so a score can be cleared:
/// a missing key is `None`, an explicit `null` is `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub metacritic_score: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl GameUpdate {
    /// True when the update touches no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this patch on top of `game`, producing the candidate to validate.
    pub fn apply_to(&self, game: &Game) -> GameInput {
        let mut input = game.to_input();
        if let Some(title) = &self.title {
            input.title = title.clone();
        }
        if let Some(genres) = &self.genres {
            input.genres = genres.clone();
        }
        if let Some(platforms) = &self.platforms {
            input.platforms = platforms.clone();
        }
        if let Some(publisher) = &self.publisher {
            input.publisher = publisher.clone();
        }
        if let Some(developer) = &self.developer {
            input.developer = developer.clone();
        }
        if let Some(year) = self.release_year {
            input.release_year = year;
        }
        if let Some(score) = self.metacritic_score {
            input.metacritic_score = score;
        }
        if let Some(hours) = self.play_hours {
            input.play_hours = hours;
        }
        if let Some(completed) = self.completed {
            input.completed = completed;
        }
        if let Some(favorite) = self.favorite {
            input.favorite = favorite;
        }
        input
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ── Filtering ───────────────────────────────────────────────────────────────

/// Optional selection criteria plus requested ordering.
///
/// Every criterion is independently optional: an empty `Vec` or `None`
/// places no constraint on that dimension, which is distinct from
/// `Some(false)`. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Matches when the game's genres intersect this set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    /// Matches when the game's platforms intersect this set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    /// Case-insensitive substring of the publisher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Case-insensitive substring of title, developer or publisher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Raw sort field name; unrecognized names fall back to `created_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    /// Raw sort order; anything but `asc` means descending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platforms.push(platform.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = Some(order.into());
        self
    }
}

/// Fields a selection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Publisher,
    Developer,
    ReleaseYear,
    MetacriticScore,
    PlayHours,
    Completed,
    Favorite,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Publisher => "publisher",
            Self::Developer => "developer",
            Self::ReleaseYear => "release_year",
            Self::MetacriticScore => "metacritic_score",
            Self::PlayHours => "play_hours",
            Self::Completed => "completed",
            Self::Favorite => "favorite",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// Parse a field name, accepting snake_case and camelCase spellings.
    pub fn parse(s: &str) -> Option<Self> {
        let field = match s.trim() {
            "title" => Self::Title,
            "publisher" => Self::Publisher,
            "developer" => Self::Developer,
            "release_year" | "releaseYear" => Self::ReleaseYear,
            "metacritic_score" | "metacriticScore" => Self::MetacriticScore,
            "play_hours" | "playHours" => Self::PlayHours,
            "completed" => Self::Completed,
            "favorite" => Self::Favorite,
            "created_at" | "createdAt" => Self::CreatedAt,
            "updated_at" | "updatedAt" => Self::UpdatedAt,
            _ => return None,
        };
        Some(field)
    }

    /// Parse a field name, falling back to `created_at` when unrecognized.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a selection ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Exactly `asc` is ascending; anything else is descending.
    pub fn parse_or_default(s: &str) -> Self {
        if s == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Aggregates ──────────────────────────────────────────────────────────────

/// One group of a group-by: a key and how many records contributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: u64,
}

impl<K> GroupCount<K> {
    pub fn new(key: K, count: u64) -> Self {
        Self { key, count }
    }
}

/// Aggregate statistics over the whole collection at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total: u64,
    pub completed: u64,
    pub favorites: u64,
    pub total_play_hours: f64,
    /// Mean Metacritic score over scored games, rounded; 0 when none is scored.
    pub avg_score: i64,
    /// Sorted by count, descending.
    pub by_genre: Vec<GroupCount<String>>,
    /// Sorted by count, descending.
    pub by_platform: Vec<GroupCount<String>>,
    /// Sorted by year, descending.
    pub by_year: Vec<GroupCount<i32>>,
}

/// Distinct values currently present, for populating filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub publishers: Vec<String>,
    pub developers: Vec<String>,
}

// ── Export ──────────────────────────────────────────────────────────────────

/// A full dump of the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub export_date: DateTime<Utc>,
    pub total_games: usize,
    pub games: Vec<Game>,
}

impl ExportDocument {
    pub fn new(games: Vec<Game>, export_date: DateTime<Utc>) -> Self {
        Self {
            export_date,
            total_games: games.len(),
            games,
        }
    }
}
