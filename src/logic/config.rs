//! Pipeline Configuration
//!
//! Everything a scan needs to know up front. Loaded from environment
//! variables (see `constants.rs`) and overridden by CLI flags.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::model::ForestConfig;

// ============================================================================
// PIPELINE CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Workbook with the three input sheets
    pub workbook_path: PathBuf,
    /// Held-out fraction for model evaluation
    pub test_fraction: f64,
    /// Seed for the split shuffle
    pub split_seed: u64,
    /// Ensemble parameters
    pub forest: ForestConfig,
    /// Append every scan to the history log (off unless asked for)
    pub history_enabled: bool,
    /// Override for the history directory
    pub history_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(constants::DEFAULT_WORKBOOK_PATH),
            test_fraction: constants::DEFAULT_TEST_FRACTION,
            split_seed: constants::DEFAULT_MODEL_SEED,
            forest: ForestConfig::default(),
            history_enabled: constants::DEFAULT_HISTORY_ENABLED,
            history_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let seed = constants::get_model_seed();
        Self {
            workbook_path: PathBuf::from(constants::get_workbook_path()),
            test_fraction: constants::get_test_fraction(),
            split_seed: seed,
            forest: ForestConfig {
                n_trees: constants::get_forest_trees(),
                max_depth: constants::get_forest_max_depth(),
                seed,
                ..ForestConfig::default()
            },
            history_enabled: constants::is_history_enabled(),
            history_dir: constants::get_history_dir().map(PathBuf::from),
        }
    }

    pub fn with_workbook(mut self, path: impl Into<PathBuf>) -> Self {
        self.workbook_path = path.into();
        self
    }

    /// Same seed drives the split and the bootstrap draws
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.split_seed = seed;
        self.forest.seed = seed;
        self
    }

    pub fn with_trees(mut self, n_trees: u16) -> Self {
        if n_trees > 0 {
            self.forest.n_trees = n_trees;
        }
        self
    }

    pub fn with_history(mut self) -> Self {
        self.history_enabled = true;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
