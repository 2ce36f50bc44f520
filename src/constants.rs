//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment overrides are read through the helpers at the bottom.

/// Default workbook path (relative to the working directory)
pub const DEFAULT_WORKBOOK_PATH: &str = "data.xlsx";

/// Default seed for the train/test split and the bootstrap draws
pub const DEFAULT_MODEL_SEED: u64 = 42;

/// Default number of trees in the ensemble
pub const DEFAULT_FOREST_TREES: u16 = 100;

/// Default held-out fraction (80/20 split)
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Scan history is only recorded when asked for
pub const DEFAULT_HISTORY_ENABLED: bool = false;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Predictive Maintenance";

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "predictive-maintenance";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get workbook path from environment or use default
pub fn get_workbook_path() -> String {
    std::env::var("PM_WORKBOOK_PATH")
        .unwrap_or_else(|_| DEFAULT_WORKBOOK_PATH.to_string())
}

/// Get model seed from environment or use default
pub fn get_model_seed() -> u64 {
    std::env::var("PM_MODEL_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MODEL_SEED)
}

/// Get tree count from environment or use default
pub fn get_forest_trees() -> u16 {
    std::env::var("PM_FOREST_TREES")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_FOREST_TREES)
}

/// Get max tree depth from environment (unbounded when unset)
pub fn get_forest_max_depth() -> Option<u16> {
    std::env::var("PM_FOREST_MAX_DEPTH")
        .ok()
        .and_then(|s| s.parse().ok())
}

/// Get held-out fraction from environment or use default
pub fn get_test_fraction() -> f64 {
    std::env::var("PM_TEST_FRACTION")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|f| (0.0..1.0).contains(f))
        .unwrap_or(DEFAULT_TEST_FRACTION)
}

/// Check if scan history is enabled
pub fn is_history_enabled() -> bool {
    std::env::var("PM_HISTORY_ENABLED")
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(DEFAULT_HISTORY_ENABLED)
}

/// Get history directory from environment, if overridden
pub fn get_history_dir() -> Option<String> {
    std::env::var("PM_HISTORY_DIR").ok()
}
