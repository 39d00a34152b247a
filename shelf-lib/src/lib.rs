//! Selection, statistics, and validated mutations over a game collection.
//!
//! Everything here runs against a [`RecordStore`]. The engines are stateless
//! and hold no locks; consistency under concurrent use is whatever the store
//! provides.

pub mod collection;
pub mod error;
pub mod filter;
pub mod memory;
pub mod settings;
pub mod stats;
pub mod store;

pub use collection::{next_timestamp, now, Collection, ImportStats};
pub use error::CollectionError;
pub use filter::FilterEngine;
pub use memory::MemoryStore;
pub use stats::StatsEngine;
pub use store::{
    contains_ignore_case, Clause, GroupField, GroupKey, NumericField, Predicate, RecordStore,
    SortKey, StoreError, TextField,
};
