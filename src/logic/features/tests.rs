//! Feature builder tests
//!
//! Join semantics, recency, cumulative hours and snapshot selection.

use chrono::NaiveDate;

use crate::logic::records::{
    MaintenanceRecord, MaintenanceType, OccurrenceRecord, OperationalRecord,
};
use super::row::NONE_SENTINEL;
use super::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn op(id: u32, d: u32, hours: f64) -> OperationalRecord {
    OperationalRecord {
        date: day(d),
        equipment_id: id,
        equipment_name: format!("Pump {}", id),
        temperature: 90.0 + d as f64,
        pressure: 10.0,
        vibration: 2.0,
        operating_hours: hours,
        energy_kwh: 400.0,
    }
}

fn maintenance(id: u32, d: u32, parts: &[&str], cause: Option<&str>) -> MaintenanceRecord {
    MaintenanceRecord {
        date: day(d),
        equipment_id: id,
        equipment_name: format!("Pump {}", id),
        maintenance_type: MaintenanceType::Corrective,
        replaced_parts: parts.iter().map(|p| p.to_string()).collect(),
        failure_cause: cause.map(str::to_string),
    }
}

fn occurrence(id: u32, d: u32, symptom: Option<&str>) -> OccurrenceRecord {
    OccurrenceRecord {
        date: day(d),
        equipment_id: id,
        equipment_name: format!("Pump {}", id),
        part: Some("Bearing".to_string()),
        observed_symptom: symptom.map(str::to_string),
        failure_class: 0,
    }
}

#[test]
fn test_running_hours_and_recency_for_one_equipment() {
    let ops = vec![op(7, 1, 20.0), op(7, 2, 22.0), op(7, 3, 21.0)];
    let rows = build_features(&ops, &[], &[]);

    let cumulative: Vec<f64> = rows.iter().map(|r| r.cumulative_operating_hours).collect();
    let recency: Vec<Option<i64>> = rows.iter().map(|r| r.days_since_last_maintenance).collect();

    assert_eq!(cumulative, vec![20.0, 42.0, 63.0]);
    assert_eq!(recency, vec![None, Some(1), Some(1)]);
}

#[test]
fn test_unsorted_input_keeps_row_order_but_derives_chronologically() {
    // Day 5 arrives before day 1 and day 3
    let ops = vec![op(1, 5, 10.0), op(1, 1, 20.0), op(1, 3, 30.0)];
    let rows = build_features(&ops, &[], &[]);

    assert_eq!(rows[0].date, day(5));
    assert_eq!(rows[1].date, day(1));
    assert_eq!(rows[2].date, day(3));

    assert_eq!(rows[1].days_since_last_maintenance, None);
    assert_eq!(rows[2].days_since_last_maintenance, Some(2));
    assert_eq!(rows[0].days_since_last_maintenance, Some(2));

    assert_eq!(rows[1].cumulative_operating_hours, 20.0);
    assert_eq!(rows[2].cumulative_operating_hours, 50.0);
    assert_eq!(rows[0].cumulative_operating_hours, 60.0);
}

#[test]
fn test_groups_are_independent() {
    let ops = vec![op(1, 1, 10.0), op(2, 2, 16.0), op(1, 4, 12.0), op(2, 9, 18.0)];
    let rows = build_features(&ops, &[], &[]);

    assert_eq!(rows[0].days_since_last_maintenance, None);
    assert_eq!(rows[1].days_since_last_maintenance, None);
    assert_eq!(rows[2].days_since_last_maintenance, Some(3));
    assert_eq!(rows[3].days_since_last_maintenance, Some(7));

    assert_eq!(rows[2].cumulative_operating_hours, 22.0);
    assert_eq!(rows[3].cumulative_operating_hours, 34.0);
}

#[test]
fn test_cumulative_hours_non_decreasing_per_equipment() {
    let ops: Vec<_> = (1..=20)
        .map(|d| op(d % 3, (d * 7) % 28 + 1, (d % 5) as f64 + 16.0))
        .collect();
    let rows = build_features(&ops, &[], &[]);

    for indices in builder::chronological_groups(&rows).values() {
        let mut previous = 0.0;
        let mut running = 0.0;
        for (position, &i) in indices.iter().enumerate() {
            let row = &rows[i];
            running += row.operating_hours;
            assert!(row.cumulative_operating_hours >= previous);
            assert_eq!(row.cumulative_operating_hours, running);
            assert_eq!(row.days_since_last_maintenance.is_none(), position == 0);
            previous = row.cumulative_operating_hours;
        }
    }
}

#[test]
fn test_left_join_fills_sentinels() {
    let ops = vec![op(3, 1, 20.0), op(3, 2, 20.0)];
    let maint = vec![maintenance(3, 2, &["Bearing", "Filter"], Some("Leak"))];
    let rows = build_features(&ops, &maint, &[]);

    assert_eq!(rows[0].maintenance_type, NONE_SENTINEL);
    assert_eq!(rows[0].replaced_parts, NONE_SENTINEL);
    assert_eq!(rows[0].failure_cause, None);
    assert_eq!(rows[0].replaced_parts(), None);

    assert_eq!(rows[1].maintenance_type, "Corrective");
    assert_eq!(rows[1].replaced_parts, "Bearing, Filter");
    assert_eq!(rows[1].failure_cause.as_deref(), Some("Leak"));
}

#[test]
fn test_failed_flag_follows_symptom() {
    let ops = vec![op(4, 1, 20.0), op(4, 2, 20.0), op(4, 3, 20.0)];
    let occ = vec![
        occurrence(4, 1, Some("Pressure loss")),
        occurrence(4, 2, None),
    ];
    let rows = build_features(&ops, &[], &occ);

    assert!(rows[0].failed);
    assert!(!rows[1].failed);
    assert_eq!(rows[1].failure_class, Some(0));
    assert!(!rows[2].failed);
    assert_eq!(rows[2].failure_class, None);
}

#[test]
fn test_join_uses_equipment_and_date() {
    // Same date, different equipment: must not match
    let ops = vec![op(1, 1, 20.0)];
    let occ = vec![occurrence(2, 1, Some("Fluid leak"))];
    let rows = build_features(&ops, &[], &occ);
    assert!(!rows[0].failed);
}

#[test]
fn test_duplicate_right_keys_keep_one_row_per_operational_record() {
    let ops = vec![op(5, 1, 20.0)];
    let maint = vec![
        maintenance(5, 1, &["Valve"], Some("Wear")),
        maintenance(5, 1, &["Compressor"], Some("Electrical fault")),
    ];
    let rows = build_features(&ops, &maint, &[]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].replaced_parts, "Valve");
}

#[test]
fn test_build_is_idempotent() {
    let ops = vec![op(1, 3, 20.0), op(2, 1, 18.0), op(1, 1, 24.0)];
    let maint = vec![maintenance(1, 3, &["Filter"], None)];
    let occ = vec![occurrence(2, 1, Some("Stopped working"))];

    let first = build_features(&ops, &maint, &occ);
    let second = build_features(&ops, &maint, &occ);
    assert_eq!(first, second);
}

#[test]
fn test_latest_snapshot_per_equipment() {
    let ops = vec![op(2, 3, 20.0), op(1, 2, 20.0), op(2, 1, 20.0), op(1, 5, 20.0)];
    let maint = vec![maintenance(1, 2, &["Bearing"], Some("Natural wear"))];
    let occ = vec![occurrence(2, 1, Some("Oil flow anomaly"))];
    let rows = build_features(&ops, &maint, &occ);

    let snapshots = latest_snapshots(&rows);
    assert_eq!(snapshots.len(), 2);

    assert_eq!(snapshots[0].equipment_id(), 1);
    assert_eq!(snapshots[0].row.date, day(5));
    assert_eq!(snapshots[0].last_replaced_parts, Some("Bearing"));
    assert_eq!(snapshots[0].last_failure_cause, Some("Natural wear"));
    assert_eq!(snapshots[0].last_symptom, None);

    assert_eq!(snapshots[1].equipment_id(), 2);
    assert_eq!(snapshots[1].row.date, day(3));
    assert_eq!(snapshots[1].last_symptom, Some("Oil flow anomaly"));
}

#[test]
fn test_snapshot_tie_prefers_later_input_row() {
    let mut second = op(9, 4, 20.0);
    second.vibration = 2.9;
    let ops = vec![op(9, 4, 20.0), second];
    let rows = build_features(&ops, &[], &[]);

    let snapshots = latest_snapshots(&rows);
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].row.vibration, 2.9);
}

#[test]
fn test_vector_encodes_missing_recency_as_zero() {
    let rows = build_features(&[op(1, 1, 20.0), op(1, 4, 22.0)], &[], &[]);

    let first = FeatureVector::from_row(&rows[0]);
    let second = FeatureVector::from_row(&rows[1]);

    assert_eq!(first.values[3], 0.0);
    assert_eq!(second.values[3], 3.0);
    assert_eq!(second.values[4], 42.0);
    assert_eq!(second.as_slice()[0], rows[1].temperature);
    assert!(second.is_compatible());
}
