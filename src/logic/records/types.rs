//! Record Types
//!
//! One struct per input sheet. Every record is keyed by
//! (equipment id, calendar date).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// JOIN KEY
// ============================================================================

/// (equipment_id, date) - the key all three tables are joined on
pub type EquipmentKey = (u32, NaiveDate);

// ============================================================================
// OPERATIONAL DATA
// ============================================================================

/// Daily operating readings for one equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalRecord {
    pub date: NaiveDate,
    pub equipment_id: u32,
    pub equipment_name: String,
    /// °C
    pub temperature: f64,
    /// bar
    pub pressure: f64,
    /// mm/s
    pub vibration: f64,
    pub operating_hours: f64,
    pub energy_kwh: f64,
}

impl OperationalRecord {
    pub fn key(&self) -> EquipmentKey {
        (self.equipment_id, self.date)
    }
}

// ============================================================================
// MAINTENANCE DATA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    Preventive,
    Corrective,
}

impl MaintenanceType {
    pub const ALL: [MaintenanceType; 2] = [MaintenanceType::Preventive, MaintenanceType::Corrective];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceType::Preventive => "Preventive",
            MaintenanceType::Corrective => "Corrective",
        }
    }

    /// Case-insensitive parse of the sheet value
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A maintenance intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub date: NaiveDate,
    pub equipment_id: u32,
    pub equipment_name: String,
    pub maintenance_type: MaintenanceType,
    pub replaced_parts: Vec<String>,
    pub failure_cause: Option<String>,
}

impl MaintenanceRecord {
    pub fn key(&self) -> EquipmentKey {
        (self.equipment_id, self.date)
    }

    /// Parts as written in the sheet ("Bearing, Filter")
    pub fn parts_label(&self) -> Option<String> {
        if self.replaced_parts.is_empty() {
            None
        } else {
            Some(self.replaced_parts.join(", "))
        }
    }

    /// Split a comma-separated sheet value into part names
    pub fn split_parts(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// ============================================================================
// OCCURRENCE RECORDS
// ============================================================================

/// A logged symptom against an equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    pub date: NaiveDate,
    pub equipment_id: u32,
    pub equipment_name: String,
    pub part: Option<String>,
    pub observed_symptom: Option<String>,
    /// 1 = the equipment stopped working
    pub failure_class: u8,
}

impl OccurrenceRecord {
    pub fn key(&self) -> EquipmentKey {
        (self.equipment_id, self.date)
    }
}

// ============================================================================
// RECORD SET
// ============================================================================

/// The three tables of one workbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub operational: Vec<OperationalRecord>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub occurrences: Vec<OccurrenceRecord>,
}
