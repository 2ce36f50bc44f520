//! Features Module - Feature Engineering
//!
//! Merges the three record sets into one feature table and derives the
//! time-based features the model trains on.
//!
//! - `builder` - left joins + per-equipment recency and cumulative hours
//! - `snapshot` - latest row per equipment
//! - `layout` / `vector` - versioned model input

pub mod builder;
pub mod layout;
pub mod row;
pub mod snapshot;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use builder::build_features_from_tables;
pub use layout::{layout_hash, FEATURE_COUNT, FEATURE_VERSION};
pub use row::FeatureRow;
pub use snapshot::{latest_snapshots, Snapshot};
pub use vector::FeatureVector;

#[cfg(test)]
pub use builder::{build_features, build_from_records};
