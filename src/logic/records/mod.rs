//! Records Module - Raw input tables
//!
//! Typed rows of the three sheets (operational, maintenance, occurrence).
//! Data structures only, no join logic.

pub mod types;

pub use types::{
    EquipmentKey,
    MaintenanceRecord,
    MaintenanceType,
    OccurrenceRecord,
    OperationalRecord,
    RecordSet,
};
