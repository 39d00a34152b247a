//! In-memory record store, for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, SubsecRound, Utc};
use shelf_catalog::{Game, GameId, GameInput, GroupCount};

use crate::store::{
    GroupField, GroupKey, NumericField, Predicate, RecordStore, SortKey, StoreError, TextField,
};

/// Record store backed by a `Vec`. Insertion order is the natural order.
#[derive(Default)]
pub struct MemoryStore {
    games: RwLock<Vec<Game>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Game>>, StoreError> {
        self.games
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Game>>, StoreError> {
        self.games
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }
}

impl RecordStore for MemoryStore {
    fn find(&self, predicate: &Predicate, sort: SortKey) -> Result<Vec<Game>, StoreError> {
        let games = self.read()?;
        let mut matched: Vec<Game> = games
            .iter()
            .filter(|g| predicate.matches(g))
            .cloned()
            .collect();
        // Stable: ties keep insertion order.
        matched.sort_by(|a, b| sort.compare(a, b));
        Ok(matched)
    }

    fn count(&self, predicate: &Predicate) -> Result<u64, StoreError> {
        let games = self.read()?;
        Ok(games.iter().filter(|g| predicate.matches(g)).count() as u64)
    }

    fn distinct_values(&self, field: TextField) -> Result<Vec<String>, StoreError> {
        let games = self.read()?;
        let mut values: Vec<String> = Vec::new();
        for game in games.iter() {
            for value in field.values(game) {
                if !values.iter().any(|v| v == value) {
                    values.push(value.to_string());
                }
            }
        }
        Ok(values)
    }

    fn group_count(&self, field: GroupField) -> Result<Vec<GroupCount<GroupKey>>, StoreError> {
        let games = self.read()?;
        let mut groups: Vec<GroupCount<GroupKey>> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();

        for key in games.iter().flat_map(|g| field.keys(g)) {
            match index.get(&key) {
                Some(&i) => groups[i].count += 1,
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(GroupCount::new(key, 1));
                }
            }
        }

        Ok(groups)
    }

    fn sum(&self, field: NumericField) -> Result<f64, StoreError> {
        let games = self.read()?;
        Ok(games.iter().filter_map(|g| field.value(g)).sum())
    }

    fn average(&self, field: NumericField) -> Result<Option<f64>, StoreError> {
        let games = self.read()?;
        let values: Vec<f64> = games.iter().filter_map(|g| field.value(g)).collect();
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }

    fn get(&self, id: &GameId) -> Result<Option<Game>, StoreError> {
        let games = self.read()?;
        Ok(games.iter().find(|g| &g.id == id).cloned())
    }

    fn insert(&self, input: GameInput, at: DateTime<Utc>) -> Result<Game, StoreError> {
        let game = Game::from_input(GameId::generate(), input, at.trunc_subsecs(6));
        self.write()?.push(game.clone());
        Ok(game)
    }

    fn replace(&self, game: &Game) -> Result<(), StoreError> {
        let mut games = self.write()?;
        let slot = games
            .iter_mut()
            .find(|g| g.id == game.id)
            .ok_or_else(|| StoreError::NotFound(game.id.clone()))?;
        *slot = game.clone();
        Ok(())
    }

    fn delete(&self, id: &GameId) -> Result<Game, StoreError> {
        let mut games = self.write()?;
        let pos = games
            .iter()
            .position(|g| &g.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(games.remove(pos))
    }
}
