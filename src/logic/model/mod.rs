//! Model Module - Failure Classifier
//!
//! Trains a failure classifier on engineered feature rows and exposes it
//! behind `FailureClassifier`, so the alert engine never depends on the
//! concrete model.
//!
//! ## Structure
//! - `classifier`: trait, errors, metadata
//! - `split`: seeded train/test split
//! - `forest`: class-balanced bagged decision trees (smartcore)
//! - `evaluation`: holdout metrics

pub mod classifier;
pub mod evaluation;
pub mod forest;
pub mod split;

#[cfg(test)]
mod tests;

// Re-export common types
pub use classifier::{checked_probability, FailureClassifier, ModelError, ModelMetadata, TrainingError};
pub use evaluation::{evaluate_holdout, HoldoutMetrics};
pub use forest::{BalancedForest, ForestConfig};
pub use split::train_test_split;
