//! Alert Types
//!
//! Data structures only. Everything here is built once per scan and never
//! mutated afterward.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY & PRIORITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// p > 0.7
    Critical,
    /// 0.5 < p <= 0.7
    Moderate,
    /// p <= 0.5
    None,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Moderate => "moderate",
            Severity::None => "none",
        }
    }

    /// Recommendation priority, if this tier gets a recommendation at all
    pub fn priority(&self) -> Option<Priority> {
        match self {
            Severity::Critical => Some(Priority::High),
            Severity::Moderate => Some(Priority::Medium),
            Severity::None => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Per-equipment outcome of one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertResult {
    pub equipment_id: u32,
    pub equipment_name: String,
    pub failure_probability: f64,
    pub severity: Severity,
    /// Alert lines (Critical only)
    pub messages: Vec<String>,
    /// Recommended actions (Critical and Moderate)
    pub actions: Vec<String>,
}

impl AlertResult {
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    pub fn alert(&self) -> Option<Alert> {
        self.is_critical().then(|| Alert {
            equipment_id: self.equipment_id,
            equipment_name: self.equipment_name.clone(),
            failure_probability: self.failure_probability,
            messages: self.messages.clone(),
        })
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        self.severity.priority().map(|priority| Recommendation {
            priority,
            equipment_id: self.equipment_id,
            equipment_name: self.equipment_name.clone(),
            actions: self.actions.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub equipment_id: u32,
    pub equipment_name: String,
    pub failure_probability: f64,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub equipment_id: u32,
    pub equipment_name: String,
    pub actions: Vec<String>,
}
