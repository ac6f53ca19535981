//! Climate dataset crate.
//!
//! Loads the country → city → month averages document and resolves
//! lookups against it.

pub mod dataset;
pub mod lookup;
pub mod normalize;

pub use dataset::{Average, Cities, Countries, Dataset, DatasetSummary, MonthlyAverages, Scope};
pub use lookup::{Level, Lookup, LookupService, NotFound};
pub use normalize::normalize_key;
