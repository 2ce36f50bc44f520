//! Feature Builder
//!
//! Joins the three record sets on (equipment_id, date) and derives the
//! per-equipment time features. Pure transformation: same input, same rows.

use std::collections::{BTreeMap, HashMap};
use chrono::NaiveDate;

use crate::logic::records::{
    EquipmentKey, MaintenanceRecord, OccurrenceRecord, OperationalRecord, RecordSet,
};
use crate::logic::workbook::{RawWorkbook, SchemaError};
use super::row::{FeatureRow, NONE_SENTINEL};

// ============================================================================
// BUILD
// ============================================================================

/// Left-join operational records to maintenance and occurrence records,
/// then derive `failed`, `days_since_last_maintenance` and
/// `cumulative_operating_hours`.
///
/// Output order is the operational input order.
pub fn build_features(
    operational: &[OperationalRecord],
    maintenance: &[MaintenanceRecord],
    occurrences: &[OccurrenceRecord],
) -> Vec<FeatureRow> {
    let maintenance_index = index_first(maintenance, MaintenanceRecord::key);
    let occurrence_index = index_first(occurrences, OccurrenceRecord::key);

    let mut rows: Vec<FeatureRow> = operational
        .iter()
        .map(|op| {
            let key = op.key();
            join_row(
                op,
                maintenance_index.get(&key).copied(),
                occurrence_index.get(&key).copied(),
            )
        })
        .collect();

    derive_group_features(&mut rows);
    rows
}

/// Convenience over a full record set
pub fn build_from_records(records: &RecordSet) -> Vec<FeatureRow> {
    build_features(&records.operational, &records.maintenance, &records.occurrences)
}

/// Validate the raw sheets (join keys and columns) and build.
pub fn build_features_from_tables(workbook: &RawWorkbook) -> Result<Vec<FeatureRow>, SchemaError> {
    let records = workbook.to_records()?;
    Ok(build_from_records(&records))
}

// ============================================================================
// JOIN
// ============================================================================

/// First record per key, in input order
fn index_first<T>(records: &[T], key: impl Fn(&T) -> EquipmentKey) -> HashMap<EquipmentKey, &T> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.entry(key(record)).or_insert(record);
    }
    index
}

fn join_row(
    op: &OperationalRecord,
    maintenance: Option<&MaintenanceRecord>,
    occurrence: Option<&OccurrenceRecord>,
) -> FeatureRow {
    let observed_symptom = occurrence
        .and_then(|o| o.observed_symptom.clone())
        .filter(|s| !s.trim().is_empty());

    FeatureRow {
        date: op.date,
        equipment_id: op.equipment_id,
        equipment_name: op.equipment_name.clone(),
        temperature: op.temperature,
        pressure: op.pressure,
        vibration: op.vibration,
        operating_hours: op.operating_hours,
        energy_kwh: op.energy_kwh,

        maintenance_type: maintenance
            .map(|m| m.maintenance_type.as_str().to_string())
            .unwrap_or_else(|| NONE_SENTINEL.to_string()),
        replaced_parts: maintenance
            .and_then(MaintenanceRecord::parts_label)
            .unwrap_or_else(|| NONE_SENTINEL.to_string()),
        failure_cause: maintenance.and_then(|m| m.failure_cause.clone()),

        part: occurrence.and_then(|o| o.part.clone()),
        failed: observed_symptom.is_some(),
        observed_symptom,
        failure_class: occurrence.map(|o| o.failure_class),

        days_since_last_maintenance: None,
        cumulative_operating_hours: 0.0,
    }
}

// ============================================================================
// GROUP FEATURES
// ============================================================================

/// Row indices per equipment, each group in chronological order.
/// Same-day rows keep their input order.
pub fn chronological_groups(rows: &[FeatureRow]) -> BTreeMap<u32, Vec<usize>> {
    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        groups.entry(row.equipment_id).or_default().push(i);
    }
    for indices in groups.values_mut() {
        indices.sort_by_key(|&i| rows[i].date);
    }
    groups
}

fn derive_group_features(rows: &mut [FeatureRow]) {
    let groups = chronological_groups(rows);

    for indices in groups.values() {
        let mut previous: Option<NaiveDate> = None;
        let mut total_hours = 0.0;

        for &i in indices {
            let row = &mut rows[i];
            row.days_since_last_maintenance = previous.map(|p| (row.date - p).num_days());
            total_hours += row.operating_hours;
            row.cumulative_operating_hours = total_hours;
            previous = Some(row.date);
        }
    }
}
