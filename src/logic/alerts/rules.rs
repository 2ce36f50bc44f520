//! Alert Rules & Thresholds
//!
//! Constants only. The tiers are checked top-down; first match wins.

use super::types::Severity;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Above this probability = Critical
pub const CRITICAL_THRESHOLD: f64 = 0.7;

/// Above this probability (and not Critical) = Moderate
pub const MODERATE_THRESHOLD: f64 = 0.5;

/// Inspection window for Critical equipment
pub const CRITICAL_INSPECTION_HOURS: u32 = 24;

/// Preventive maintenance window for Moderate equipment
pub const MODERATE_MAINTENANCE_HOURS: u32 = 72;

/// Shown when no symptom was ever recorded for the equipment
pub const UNKNOWN_SYMPTOM: &str = "Unknown";

/// Map a failure probability to its tier
pub fn classify_probability(p: f64) -> Severity {
    if p > CRITICAL_THRESHOLD {
        Severity::Critical
    } else if p > MODERATE_THRESHOLD {
        Severity::Moderate
    } else {
        Severity::None
    }
}
