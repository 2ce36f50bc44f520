//! Feature Row - one joined, enriched operational record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel written where a left join found no maintenance record
pub const NONE_SENTINEL: &str = "None";

/// Operational record + joined maintenance/occurrence fields + derived features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    // --- operational ---
    pub date: NaiveDate,
    pub equipment_id: u32,
    pub equipment_name: String,
    pub temperature: f64,
    pub pressure: f64,
    pub vibration: f64,
    pub operating_hours: f64,
    pub energy_kwh: f64,

    // --- joined maintenance (sentinel-filled) ---
    pub maintenance_type: String,
    pub replaced_parts: String,
    pub failure_cause: Option<String>,

    // --- joined occurrence ---
    pub part: Option<String>,
    pub observed_symptom: Option<String>,
    pub failure_class: Option<u8>,

    // --- derived ---
    pub failed: bool,
    pub days_since_last_maintenance: Option<i64>,
    pub cumulative_operating_hours: f64,
}

impl FeatureRow {
    /// Replaced parts, unless this row carries the sentinel
    pub fn replaced_parts(&self) -> Option<&str> {
        if self.replaced_parts == NONE_SENTINEL {
            None
        } else {
            Some(self.replaced_parts.as_str())
        }
    }

    /// Target label for training
    pub fn label(&self) -> u32 {
        u32::from(self.failed)
    }
}
