//! Synthetic Data Generator
//!
//! Uniform random readings, maintenance events and occurrences for a fleet
//! of equipment. One record per day per table, each against a randomly
//! chosen equipment.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::logic::records::{
    MaintenanceRecord, MaintenanceType, OccurrenceRecord, OperationalRecord, RecordSet,
};

// ============================================================================
// VOCABULARY
// ============================================================================

pub const EQUIPMENT_NAMES: &[&str] = &[
    "Centrifugal Pump",
    "Gas Compressor",
    "Heat Exchanger",
    "Steam Turbine",
    "Control Valve",
    "Cooling System",
    "Particle Separator",
    "Catalytic Cracking Furnace",
    "Hydrogen Refiner",
    "Vacuum Distillation Unit",
];

pub const MAINTENANCE_PARTS: &[&str] = &["Bearing", "Valve", "Filter", "Heat exchanger", "Compressor"];

pub const FAILURE_CAUSES: &[&str] = &[
    "Natural wear",
    "Electrical fault",
    "Leak",
    "Mechanical problem",
    "N/A",
];

pub const OCCURRENCE_PARTS: &[&str] = &[
    "Bearing",
    "Oil filter",
    "Pressure valve",
    "Heat exchanger",
    "Flow control valve",
];

pub const SYMPTOMS: &[&str] = &[
    "Above-normal vibration",
    "Pressure loss",
    "Lack of pressure",
    "Fluid leak",
    "Oil flow anomaly",
    "Stopped working",
];

/// The one symptom that marks failure class 1
pub const FAILURE_SYMPTOM: &str = "Stopped working";

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub equipment_count: u32,
    pub operational_start: NaiveDate,
    pub operational_end: NaiveDate,
    pub events_start: NaiveDate,
    pub events_end: NaiveDate,
    /// Fixed seed for reproducible output; entropy when None
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            equipment_count: 50,
            operational_start: ymd(2024, 1, 1),
            operational_end: ymd(2024, 6, 1),
            events_start: ymd(2024, 1, 1),
            events_end: ymd(2024, 12, 31),
            seed: None,
        }
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[derive(Debug, Clone)]
struct Equipment {
    id: u32,
    name: &'static str,
}

// ============================================================================
// GENERATE
// ============================================================================

pub fn generate_records(config: &GeneratorConfig) -> RecordSet {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let fleet: Vec<Equipment> = (1..=config.equipment_count.max(1))
        .map(|id| Equipment {
            id,
            name: EQUIPMENT_NAMES[(id as usize - 1) % EQUIPMENT_NAMES.len()],
        })
        .collect();

    let records = RecordSet {
        operational: operational(&mut rng, &fleet, config.operational_start, config.operational_end),
        maintenance: maintenance(&mut rng, &fleet, config.events_start, config.events_end),
        occurrences: occurrences(&mut rng, &fleet, config.events_start, config.events_end),
    };

    log::info!(
        "Generated {} operational, {} maintenance, {} occurrence records for {} equipment",
        records.operational.len(),
        records.maintenance.len(),
        records.occurrences.len(),
        fleet.len()
    );

    records
}

fn days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    // Callers only pass non-empty constant tables and fleets
    &items[rng.gen_range(0..items.len())]
}

fn operational(rng: &mut StdRng, fleet: &[Equipment], start: NaiveDate, end: NaiveDate) -> Vec<OperationalRecord> {
    days(start, end)
        .map(|date| {
            let equipment = pick(rng, fleet);
            OperationalRecord {
                date,
                equipment_id: equipment.id,
                equipment_name: equipment.name.to_string(),
                temperature: round2(rng.gen_range(70.0..=130.0)),
                pressure: round2(rng.gen_range(8.0..=16.0)),
                vibration: round2(rng.gen_range(1.0..=3.0)),
                operating_hours: rng.gen_range(16..=24) as f64,
                energy_kwh: rng.gen_range(300..=500) as f64,
            }
        })
        .collect()
}

fn maintenance(rng: &mut StdRng, fleet: &[Equipment], start: NaiveDate, end: NaiveDate) -> Vec<MaintenanceRecord> {
    days(start, end)
        .map(|date| {
            let equipment = pick(rng, fleet);
            let maintenance_type = *pick(rng, &MaintenanceType::ALL);
            let count = rng.gen_range(1..=3);
            let replaced_parts = MAINTENANCE_PARTS
                .choose_multiple(rng, count)
                .map(|p| p.to_string())
                .collect();
            MaintenanceRecord {
                date,
                equipment_id: equipment.id,
                equipment_name: equipment.name.to_string(),
                maintenance_type,
                replaced_parts,
                failure_cause: Some(pick(rng, FAILURE_CAUSES).to_string()),
            }
        })
        .collect()
}

fn occurrences(rng: &mut StdRng, fleet: &[Equipment], start: NaiveDate, end: NaiveDate) -> Vec<OccurrenceRecord> {
    days(start, end)
        .map(|date| {
            let equipment = pick(rng, fleet);
            let symptom = *pick(rng, SYMPTOMS);
            OccurrenceRecord {
                date,
                equipment_id: equipment.id,
                equipment_name: equipment.name.to_string(),
                part: Some(pick(rng, OCCURRENCE_PARTS).to_string()),
                observed_symptom: Some(symptom.to_string()),
                failure_class: u8::from(symptom == FAILURE_SYMPTOM),
            }
        })
        .collect()
}
