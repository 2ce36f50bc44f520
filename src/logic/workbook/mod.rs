//! Workbook Module - Data Source
//!
//! Reads and writes the three-sheet workbook the pipeline runs on, and
//! synthesizes demo data in the same shape.
//!
//! ## Structure
//! - `schema`: sheet/column names, raw tables, `SchemaError`
//! - `reader`: calamine-backed loader
//! - `writer`: rust_xlsxwriter-backed writer
//! - `generator`: random synthetic records

pub mod generator;
pub mod reader;
pub mod schema;
pub mod writer;


pub use generator::{generate_records, GeneratorConfig};
pub use reader::{load_workbook, WorkbookError};
pub use schema::{RawWorkbook, SchemaError};
pub use writer::write_workbook;

// ============================================================================
// SHEET NAMES
// ============================================================================

pub const OPERATIONAL_SHEET: &str = "Operational Data";
pub const MAINTENANCE_SHEET: &str = "Maintenance Data";
pub const OCCURRENCE_SHEET: &str = "Occurrence Records";

// ============================================================================
// COLUMNS
// ============================================================================

// Join keys (every sheet)
pub const COL_DATE: &str = "Date";
pub const COL_EQUIPMENT_ID: &str = "Equipment ID";
pub const COL_EQUIPMENT: &str = "Equipment";

// Operational Data
pub const COL_TEMPERATURE: &str = "Temperature (°C)";
pub const COL_PRESSURE: &str = "Pressure (bar)";
pub const COL_VIBRATION: &str = "Vibration (mm/s)";
pub const COL_OPERATING_HOURS: &str = "Operating Hours";
pub const COL_ENERGY: &str = "Energy Consumption (kWh)";

// Maintenance Data
pub const COL_MAINTENANCE_TYPE: &str = "Maintenance Type";
pub const COL_REPLACED_PARTS: &str = "Replaced Parts";
pub const COL_FAILURE_CAUSE: &str = "Failure Cause";

// Occurrence Records
pub const COL_PART: &str = "Part";
pub const COL_SYMPTOM: &str = "Observed Symptom";
pub const COL_FAILURE_CLASS: &str = "Failure Class";

pub const JOIN_KEYS: &[&str] = &[COL_DATE, COL_EQUIPMENT_ID];

pub const OPERATIONAL_COLUMNS: &[&str] = &[
    COL_DATE,
    COL_EQUIPMENT_ID,
    COL_EQUIPMENT,
    COL_TEMPERATURE,
    COL_PRESSURE,
    COL_VIBRATION,
    COL_OPERATING_HOURS,
    COL_ENERGY,
];

pub const MAINTENANCE_COLUMNS: &[&str] = &[
    COL_DATE,
    COL_EQUIPMENT_ID,
    COL_EQUIPMENT,
    COL_MAINTENANCE_TYPE,
    COL_REPLACED_PARTS,
    COL_FAILURE_CAUSE,
];

pub const OCCURRENCE_COLUMNS: &[&str] = &[
    COL_DATE,
    COL_EQUIPMENT_ID,
    COL_EQUIPMENT,
    COL_PART,
    COL_SYMPTOM,
    COL_FAILURE_CLASS,
];
