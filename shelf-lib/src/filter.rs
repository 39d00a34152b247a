//! Selection: compiles a [`FilterSpec`] into a predicate and ordering and
//! runs it against a record store.
//!
//! Malformed criteria never fail. Blank strings are ignored, an unknown
//! sort field falls back to `created_at`, and any sort order other than
//! `asc` is descending.

use shelf_catalog::{FilterSpec, Game, SortField, SortOrder};

use crate::store::{Clause, Predicate, RecordStore, SortKey, StoreError};

/// Stateless selection engine over a borrowed store.
pub struct FilterEngine<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> FilterEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Games matching every present criterion of `spec`, in the requested order.
    pub fn select(&self, spec: &FilterSpec) -> Result<Vec<Game>, StoreError> {
        let (predicate, sort) = compile(spec);
        log::debug!(
            "select: {} clause(s), sort by {} {}",
            predicate.clauses().len(),
            sort.field,
            sort.order
        );
        self.store.find(&predicate, sort)
    }
}

/// Compile both halves of a filter spec.
pub fn compile(spec: &FilterSpec) -> (Predicate, SortKey) {
    (compile_predicate(spec), compile_sort(spec))
}

/// Build the conjunctive predicate: one clause per present criterion.
pub fn compile_predicate(spec: &FilterSpec) -> Predicate {
    let mut predicate = Predicate::all();

    let genres = non_blank(&spec.genres);
    if !genres.is_empty() {
        predicate = predicate.and(Clause::GenreIn(genres));
    }
    let platforms = non_blank(&spec.platforms);
    if !platforms.is_empty() {
        predicate = predicate.and(Clause::PlatformIn(platforms));
    }
    if let Some(completed) = spec.completed {
        predicate = predicate.and(Clause::Completed(completed));
    }
    if let Some(favorite) = spec.favorite {
        predicate = predicate.and(Clause::Favorite(favorite));
    }
    if let Some(publisher) = present(&spec.publisher) {
        predicate = predicate.and(Clause::PublisherContains(publisher));
    }
    if let Some(search) = present(&spec.search) {
        predicate = predicate.and(Clause::Search(search));
    }

    predicate
}

/// Resolve the requested ordering, falling back to `created_at desc`.
pub fn compile_sort(spec: &FilterSpec) -> SortKey {
    let field = match present(&spec.sort_field) {
        Some(name) => SortField::parse(&name).unwrap_or_else(|| {
            log::debug!("Unknown sort field '{name}', using {}", SortField::default());
            SortField::default()
        }),
        None => SortField::default(),
    };
    let order = spec
        .sort_order
        .as_deref()
        .map(SortOrder::parse_or_default)
        .unwrap_or_default();
    SortKey::new(field, order)
}

fn non_blank(values: &[String]) -> Vec<String> {
    values.iter().filter(|v| !v.is_empty()).cloned().collect()
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
