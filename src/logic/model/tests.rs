//! Model tests
//!
//! Training preconditions and the shape of the forest's probabilities on
//! separable data.

use chrono::NaiveDate;

use crate::logic::features::{build_features, FeatureRow, FeatureVector};
use crate::logic::records::{OccurrenceRecord, OperationalRecord};
use super::*;

fn small_forest() -> ForestConfig {
    ForestConfig {
        n_trees: 15,
        ..ForestConfig::default()
    }
}

/// Hot equipment (ids 1..=10) fails every day; cool equipment (11..=20) never does.
fn separable_rows() -> Vec<FeatureRow> {
    let mut operational = Vec::new();
    let mut occurrences = Vec::new();

    for id in 1..=20u32 {
        let hot = id <= 10;
        for d in 1..=5u32 {
            let date = NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
            operational.push(OperationalRecord {
                date,
                equipment_id: id,
                equipment_name: format!("Unit {}", id),
                temperature: if hot { 125.0 + d as f64 } else { 75.0 + d as f64 },
                pressure: 12.0,
                vibration: if hot { 2.8 } else { 1.2 },
                operating_hours: 20.0,
                energy_kwh: 400.0,
            });
            if hot {
                occurrences.push(OccurrenceRecord {
                    date,
                    equipment_id: id,
                    equipment_name: format!("Unit {}", id),
                    part: Some("Bearing".to_string()),
                    observed_symptom: Some("Stopped working".to_string()),
                    failure_class: 1,
                });
            }
        }
    }

    build_features(&operational, &[], &occurrences)
}

#[test]
fn test_empty_training_set_rejected() {
    let err = BalancedForest::fit(&[], &small_forest()).unwrap_err();
    assert_eq!(err, TrainingError::EmptyTrainingSet);
}

#[test]
fn test_all_negative_labels_rejected() {
    let rows: Vec<FeatureRow> = separable_rows().into_iter().filter(|r| !r.failed).collect();
    let err = BalancedForest::fit(&rows, &small_forest()).unwrap_err();
    assert_eq!(err, TrainingError::DegenerateLabels { positives: 0, negatives: rows.len() });
}

#[test]
fn test_all_positive_labels_rejected() {
    let samples = vec![vec![1.0; 5], vec![2.0; 5]];
    let err = BalancedForest::fit_samples(&samples, &[1, 1], &small_forest()).unwrap_err();
    assert!(matches!(err, TrainingError::DegenerateLabels { positives: 2, negatives: 0 }));
}

#[test]
fn test_separable_data_ranks_failures_higher() {
    let rows = separable_rows();
    let forest = BalancedForest::fit(&rows, &small_forest()).unwrap();
    assert_eq!(forest.metadata().n_trees, 15);

    let hot = FeatureVector::from_values([128.0, 12.0, 2.8, 1.0, 60.0]);
    let cool = FeatureVector::from_values([77.0, 12.0, 1.2, 1.0, 60.0]);

    let p_hot = forest.predict_probability(&hot).unwrap();
    let p_cool = forest.predict_probability(&cool).unwrap();
    assert!(p_hot > 0.7, "hot probability {p_hot}");
    assert!(p_cool < 0.3, "cool probability {p_cool}");
}

#[test]
fn test_same_seed_same_probabilities() {
    let rows = separable_rows();
    let a = BalancedForest::fit(&rows, &small_forest()).unwrap();
    let b = BalancedForest::fit(&rows, &small_forest()).unwrap();

    for row in &rows {
        let v = FeatureVector::from_row(row);
        assert_eq!(a.predict_probability(&v).unwrap(), b.predict_probability(&v).unwrap());
    }
}

#[test]
fn test_incompatible_layout_rejected() {
    let forest = BalancedForest::fit(&separable_rows(), &small_forest()).unwrap();
    let mut v = FeatureVector::from_values([100.0, 12.0, 2.0, 1.0, 40.0]);
    v.layout_hash ^= 0xFFFF;
    assert!(matches!(
        forest.predict_probability(&v),
        Err(ModelError::IncompatibleLayout { .. })
    ));
}

#[test]
fn test_holdout_metrics_on_separable_split() {
    let rows = separable_rows();
    let (train, test) = train_test_split(&rows, 0.2, 42);
    assert_eq!(test.len(), 20);

    let forest = BalancedForest::fit(&train, &small_forest()).unwrap();
    let metrics = evaluate_holdout(&forest, &test).unwrap();

    assert_eq!(metrics.test_rows, 20);
    assert_eq!(metrics.support, test.iter().filter(|r| r.failed).count());
    assert_eq!(metrics.accuracy, 1.0);
}

struct Fixed(f64);

impl FailureClassifier for Fixed {
    fn predict_probability(&self, _: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

#[test]
fn test_holdout_metrics_with_constant_classifier() {
    let rows = separable_rows();
    let metrics = evaluate_holdout(&Fixed(0.9), &rows).unwrap();

    assert_eq!(metrics.support, 50);
    assert_eq!(metrics.recall, 1.0);
    assert_eq!(metrics.precision, 0.5);
    assert_eq!(metrics.accuracy, 0.5);

    let empty = evaluate_holdout(&Fixed(0.1), &[]).unwrap();
    assert_eq!(empty, HoldoutMetrics::default());
}
