//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};
use super::layout::{
    layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use super::row::FeatureRow;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// Every classifier call takes one of these, never a bare slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Model input for one feature row.
    /// A missing recency (first record of an equipment) is encoded as 0.
    pub fn from_row(row: &FeatureRow) -> Self {
        Self::from_values([
            row.temperature,
            row.pressure,
            row.vibration,
            row.days_since_last_maintenance.unwrap_or(0) as f64,
            row.cumulative_operating_hours,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Check if this vector is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        self.version == FEATURE_VERSION && self.layout_hash == layout_hash()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

impl From<&FeatureRow> for FeatureVector {
    fn from(row: &FeatureRow) -> Self {
        Self::from_row(row)
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}
