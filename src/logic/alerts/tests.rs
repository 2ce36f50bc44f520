//! Alert engine tests
//!
//! The classifier is a stub reading the probability off the temperature
//! (temperature / 100), so each equipment's tier is set by its latest row.

use chrono::NaiveDate;

use crate::logic::features::{build_features, FeatureRow, FeatureVector};
use crate::logic::model::{FailureClassifier, ModelError};
use crate::logic::records::{
    MaintenanceRecord, MaintenanceType, OccurrenceRecord, OperationalRecord,
};
use super::*;

struct TemperatureStub;

impl FailureClassifier for TemperatureStub {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(features.values[0] / 100.0)
    }
}

struct Broken(f64);

impl FailureClassifier for Broken {
    fn predict_probability(&self, _: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

fn op(id: u32, d: u32, temperature: f64) -> OperationalRecord {
    OperationalRecord {
        date: day(d),
        equipment_id: id,
        equipment_name: format!("Gas Compressor {}", id),
        temperature,
        pressure: 11.0,
        vibration: 2.345,
        operating_hours: 18.0,
        energy_kwh: 350.0,
    }
}

fn rows_with_latest(latest: &[(u32, f64)]) -> Vec<FeatureRow> {
    // An older row per equipment that would land in a different tier
    let mut ops: Vec<OperationalRecord> = latest.iter().map(|&(id, _)| op(id, 1, 99.0)).collect();
    ops.extend(latest.iter().map(|&(id, t)| op(id, 2, t)));
    build_features(&ops, &[], &[])
}

#[test]
fn test_critical_probability_gives_alert_and_high_recommendation() {
    let rows = rows_with_latest(&[(1, 85.0)]);
    let (alerts, recommendations) = evaluate(&rows, &TemperatureStub).unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].priority, Priority::High);
    assert!(recommendations.iter().all(|r| r.priority != Priority::Medium));

    assert_eq!(alerts[0].equipment_id, 1);
    assert_eq!(alerts[0].messages[0], "Critical failure probability (85%)");
    assert_eq!(alerts[0].messages[1], "Expected symptom: Unknown");
    assert_eq!(
        recommendations[0].actions,
        vec!["Perform immediate inspection within the next 24h".to_string()]
    );
}

#[test]
fn test_moderate_probability_gives_medium_recommendation_only() {
    let rows = rows_with_latest(&[(2, 55.0)]);
    let (alerts, recommendations) = evaluate(&rows, &TemperatureStub).unwrap();

    assert!(alerts.is_empty());
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].priority, Priority::Medium);
    assert_eq!(
        recommendations[0].actions,
        vec![
            "Schedule preventive maintenance within the next 72h".to_string(),
            "Check vibration trend: 2.3 mm/s".to_string(),
        ]
    );
}

#[test]
fn test_low_probability_gives_nothing() {
    let rows = rows_with_latest(&[(3, 40.0)]);
    let (alerts, recommendations) = evaluate(&rows, &TemperatureStub).unwrap();
    assert!(alerts.is_empty());
    assert!(recommendations.is_empty());

    let results = assess(&rows, &TemperatureStub).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].severity, Severity::None);
    assert!(results[0].messages.is_empty() && results[0].actions.is_empty());
}

#[test]
fn test_threshold_boundaries() {
    let rows = rows_with_latest(&[(1, 70.0), (2, 50.0)]);
    let results = assess(&rows, &TemperatureStub).unwrap();
    assert_eq!(results[0].severity, Severity::Moderate);
    assert_eq!(results[1].severity, Severity::None);
}

#[test]
fn test_results_ordered_by_equipment_and_mixed_fleet() {
    let rows = rows_with_latest(&[(9, 90.0), (4, 60.0), (6, 10.0), (2, 75.0)]);
    let results = assess(&rows, &TemperatureStub).unwrap();

    let ids: Vec<u32> = results.iter().map(|r| r.equipment_id).collect();
    assert_eq!(ids, vec![2, 4, 6, 9]);

    let (alerts, recommendations) = partition(&results);
    let alert_ids: Vec<u32> = alerts.iter().map(|a| a.equipment_id).collect();
    assert_eq!(alert_ids, vec![2, 9]);

    let priorities: Vec<(u32, Priority)> = recommendations.iter().map(|r| (r.equipment_id, r.priority)).collect();
    assert_eq!(priorities, vec![(2, Priority::High), (4, Priority::Medium), (9, Priority::High)]);
}

#[test]
fn test_critical_actions_reference_last_known_context() {
    let ops = vec![op(5, 1, 50.0), op(5, 2, 60.0), op(5, 3, 92.0)];
    let maintenance = vec![MaintenanceRecord {
        date: day(1),
        equipment_id: 5,
        equipment_name: "Gas Compressor 5".to_string(),
        maintenance_type: MaintenanceType::Corrective,
        replaced_parts: vec!["Bearing".to_string(), "Valve".to_string()],
        failure_cause: Some("Leak".to_string()),
    }];
    let occurrences = vec![OccurrenceRecord {
        date: day(2),
        equipment_id: 5,
        equipment_name: "Gas Compressor 5".to_string(),
        part: Some("Pressure valve".to_string()),
        observed_symptom: Some("Pressure loss".to_string()),
        failure_class: 0,
    }];
    let rows = build_features(&ops, &maintenance, &occurrences);

    let results = assess(&rows, &TemperatureStub).unwrap();
    assert_eq!(results[0].severity, Severity::Critical);
    assert_eq!(results[0].messages[1], "Expected symptom: Pressure loss");
    assert_eq!(
        results[0].actions,
        vec![
            "Perform immediate inspection within the next 24h".to_string(),
            "Check Bearing, Valve".to_string(),
            "Monitor Leak".to_string(),
        ]
    );
}

#[test]
fn test_unknown_cause_not_monitored() {
    let ops = vec![op(8, 1, 95.0)];
    let maintenance = vec![MaintenanceRecord {
        date: day(1),
        equipment_id: 8,
        equipment_name: "Gas Compressor 8".to_string(),
        maintenance_type: MaintenanceType::Preventive,
        replaced_parts: vec!["Filter".to_string()],
        failure_cause: Some("N/A".to_string()),
    }];
    let rows = build_features(&ops, &maintenance, &[]);
    let results = assess(&rows, &TemperatureStub).unwrap();
    assert_eq!(results[0].actions.len(), 2);
    assert_eq!(results[0].actions[1], "Check Filter");
}

#[test]
fn test_invalid_probability_is_an_error() {
    let rows = rows_with_latest(&[(1, 80.0)]);
    assert!(matches!(assess(&rows, &Broken(f64::NAN)), Err(ModelError::InvalidProbability(_))));
    assert!(matches!(evaluate(&rows, &Broken(1.5)), Err(ModelError::InvalidProbability(_))));
}

#[test]
fn test_deterministic() {
    let rows = rows_with_latest(&[(1, 85.0), (2, 55.0), (3, 40.0)]);
    assert_eq!(assess(&rows, &TemperatureStub).unwrap(), assess(&rows, &TemperatureStub).unwrap());
}

#[test]
fn test_empty_features_give_empty_output() {
    let (alerts, recommendations) = evaluate(&[], &TemperatureStub).unwrap();
    assert!(alerts.is_empty() && recommendations.is_empty());
}
