//! Classifier Trait & Errors
//!
//! The alert engine only ever sees a `FailureClassifier`. The production
//! implementation is `BalancedForest`; tests plug in fixed-probability stubs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::features::FeatureVector;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainingError {
    #[error("no feature rows to train on")]
    EmptyTrainingSet,

    #[error("training labels need both classes (failures: {positives}, healthy: {negatives})")]
    DegenerateLabels { positives: usize, negatives: usize },

    #[error("tree fit failed: {0}")]
    Fit(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("feature vector layout v{version} ({hash:08x}) does not match the model")]
    IncompatibleLayout { version: u8, hash: u32 },

    #[error("classifier returned invalid probability {0}")]
    InvalidProbability(f64),

    #[error("prediction failed: {0}")]
    Prediction(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Anything that turns a feature vector into a failure probability
pub trait FailureClassifier {
    /// Probability of failure, in [0, 1]
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

impl<C: FailureClassifier + ?Sized> FailureClassifier for &C {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        (**self).predict_probability(features)
    }
}

/// Reject NaN and anything outside [0, 1]
pub fn checked_probability(p: f64) -> Result<f64, ModelError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ModelError::InvalidProbability(p))
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Describes a trained model for reports and history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub n_trees: usize,
    pub features: usize,
    pub layout_hash: u32,
    pub training_rows: usize,
    pub positives: usize,
    pub trained_at: chrono::DateTime<chrono::Utc>,
}
