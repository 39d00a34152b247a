//! Whole-collection statistics, recomputed from store primitives on every call.
//!
//! Each figure is a separate store query. Under concurrent writes the
//! figures of one snapshot may reflect slightly different store states.

use shelf_catalog::{FilterOptions, GroupCount, StatsSnapshot};

use crate::store::{
    Clause, GroupField, GroupKey, NumericField, Predicate, RecordStore, StoreError, TextField,
};

/// Stateless aggregation engine over a borrowed store.
pub struct StatsEngine<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> StatsEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Compute a fresh snapshot. An empty collection yields all zeros.
    pub fn snapshot(&self) -> Result<StatsSnapshot, StoreError> {
        let total = self.store.count(&Predicate::all())?;
        let completed = self
            .store
            .count(&Predicate::all().and(Clause::Completed(true)))?;
        let favorites = self
            .store
            .count(&Predicate::all().and(Clause::Favorite(true)))?;
        let total_play_hours = self.store.sum(NumericField::PlayHours)?;
        let avg_score = self
            .store
            .average(NumericField::MetacriticScore)?
            .map(|avg| avg.round() as i64)
            .unwrap_or(0);

        let mut by_genre = text_groups(self.store.group_count(GroupField::Genre)?);
        by_genre.sort_by(|a, b| b.count.cmp(&a.count));

        let mut by_platform = text_groups(self.store.group_count(GroupField::Platform)?);
        by_platform.sort_by(|a, b| b.count.cmp(&a.count));

        // Years are ordered by key, not by count.
        let mut by_year = year_groups(self.store.group_count(GroupField::ReleaseYear)?);
        by_year.sort_by(|a, b| b.key.cmp(&a.key));

        Ok(StatsSnapshot {
            total,
            completed,
            favorites,
            total_play_hours,
            avg_score,
            by_genre,
            by_platform,
            by_year,
        })
    }

    /// Distinct genres, platforms, publishers and developers, each sorted.
    pub fn filter_options(&self) -> Result<FilterOptions, StoreError> {
        Ok(FilterOptions {
            genres: self.sorted_distinct(TextField::Genre)?,
            platforms: self.sorted_distinct(TextField::Platform)?,
            publishers: self.sorted_distinct(TextField::Publisher)?,
            developers: self.sorted_distinct(TextField::Developer)?,
        })
    }

    fn sorted_distinct(&self, field: TextField) -> Result<Vec<String>, StoreError> {
        let mut values = self.store.distinct_values(field)?;
        values.sort();
        values.dedup();
        Ok(values)
    }
}

fn text_groups(groups: Vec<GroupCount<GroupKey>>) -> Vec<GroupCount<String>> {
    groups
        .into_iter()
        .filter_map(|g| match g.key {
            GroupKey::Text(key) => Some(GroupCount::new(key, g.count)),
            GroupKey::Year(year) => {
                log::warn!("Ignoring numeric group key {year} in a text group-by");
                None
            }
        })
        .collect()
}

fn year_groups(groups: Vec<GroupCount<GroupKey>>) -> Vec<GroupCount<i32>> {
    groups
        .into_iter()
        .filter_map(|g| match g.key {
            GroupKey::Year(year) => Some(GroupCount::new(year, g.count)),
            GroupKey::Text(key) => {
                log::warn!("Ignoring text group key '{key}' in a year group-by");
                None
            }
        })
        .collect()
}
