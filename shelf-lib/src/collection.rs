//! The game collection: validated mutations plus selection and statistics.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use shelf_catalog::{
    current_year, validate_input, ExportDocument, FilterOptions, FilterSpec, Game, GameId,
    GameInput, GameUpdate, SortField, SortOrder, StatsSnapshot, Violation,
};

use crate::error::CollectionError;
use crate::filter::FilterEngine;
use crate::stats::StatsEngine;
use crate::store::{Predicate, RecordStore, SortKey};

/// Current time, truncated to the microsecond precision every store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a record last stamped at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not
/// advanced past it.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Outcome of a bulk import.
#[derive(Debug, Default)]
pub struct ImportStats {
    pub created: usize,
    /// Rejected entries: position in the seed, title, and why.
    pub rejected: Vec<(usize, String, Vec<Violation>)>,
}

/// A game collection persisted in a record store.
pub struct Collection<S> {
    store: S,
}

impl<S: RecordStore> Collection<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new game.
    pub fn create(&self, input: GameInput) -> Result<Game, CollectionError> {
        let input =
            validate_input(&input, current_year()).map_err(CollectionError::Validation)?;
        let game = self.store.insert(input, now())?;
        log::info!("Added '{}' ({})", game.title, game.id);
        Ok(game)
    }

    pub fn get(&self, id: &GameId) -> Result<Game, CollectionError> {
        self.store
            .get(id)?
            .ok_or_else(|| CollectionError::NotFound(id.clone()))
    }

    /// Apply a partial update. The patched record is validated as a whole
    /// and replaced in one step; `updated_at` is always refreshed.
    pub fn update(&self, id: &GameId, update: &GameUpdate) -> Result<Game, CollectionError> {
        let mut game = self.get(id)?;
        let candidate = validate_input(&update.apply_to(&game), current_year())
            .map_err(CollectionError::Validation)?;
        game.assign(candidate);
        game.updated_at = next_timestamp(game.updated_at);
        self.store.replace(&game)?;
        log::info!("Updated '{}' ({})", game.title, game.id);
        Ok(game)
    }

    /// Hard-delete a game, returning the removed record.
    pub fn delete(&self, id: &GameId) -> Result<Game, CollectionError> {
        let game = self.store.delete(id)?;
        log::info!("Deleted '{}' ({})", game.title, game.id);
        Ok(game)
    }

    /// Flip the favorite flag.
    pub fn toggle_favorite(&self, id: &GameId) -> Result<Game, CollectionError> {
        let mut game = self.get(id)?;
        game.favorite = !game.favorite;
        game.updated_at = next_timestamp(game.updated_at);
        self.store.replace(&game)?;
        log::debug!("Favorite for {} is now {}", game.id, game.favorite);
        Ok(game)
    }

    pub fn select(&self, spec: &FilterSpec) -> Result<Vec<Game>, CollectionError> {
        Ok(FilterEngine::new(&self.store).select(spec)?)
    }

    pub fn stats(&self) -> Result<StatsSnapshot, CollectionError> {
        Ok(StatsEngine::new(&self.store).snapshot()?)
    }

    pub fn filter_options(&self) -> Result<FilterOptions, CollectionError> {
        Ok(StatsEngine::new(&self.store).filter_options()?)
    }

    /// Every game, oldest first.
    pub fn export(&self) -> Result<ExportDocument, CollectionError> {
        let games = self.store.find(
            &Predicate::all(),
            SortKey::new(SortField::CreatedAt, SortOrder::Asc),
        )?;
        Ok(ExportDocument::new(games, now()))
    }

    /// Create every valid entry; invalid entries are reported, not fatal.
    ///
    /// A store failure stops the import; games created before it remain.
    pub fn import(&self, inputs: Vec<GameInput>) -> Result<ImportStats, CollectionError> {
        let mut stats = ImportStats::default();
        for (i, input) in inputs.into_iter().enumerate() {
            let title = input.title.clone();
            match self.create(input) {
                Ok(_) => stats.created += 1,
                Err(CollectionError::Validation(violations)) => {
                    log::warn!("Skipping seed entry {} ('{}'): invalid", i + 1, title);
                    stats.rejected.push((i, title, violations));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(stats)
    }
}
