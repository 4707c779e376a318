//! Historical dataset: station topology and per-stop departures.
//!
//! Both documents are published by an external pipeline as JSON. The
//! departures document may be in direct form (stop → records) or compacted
//! columnar form (positional tuples plus a shared name table); both decode
//! to the same [`DepartureRecord`](crate::domain::DepartureRecord)s.

mod decode;
mod error;
mod raw;
mod shared;
mod store;

pub use error::LoadError;
pub use shared::{DatasetFiles, SharedDataset};
pub use store::DatasetStore;
