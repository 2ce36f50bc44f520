//! Alert Engine
//!
//! Latest snapshot per equipment -> classifier -> severity tier -> messages.
//! Pure: no I/O, no logging, same features and classifier give the same
//! results.

use crate::logic::features::{latest_snapshots, FeatureRow, Snapshot};
use crate::logic::model::{checked_probability, FailureClassifier, ModelError};
use super::rules::*;
use super::types::{Alert, AlertResult, Recommendation, Severity};

/// One result per distinct equipment id, ordered by id
pub fn assess<C: FailureClassifier + ?Sized>(
    features: &[FeatureRow],
    classifier: &C,
) -> Result<Vec<AlertResult>, ModelError> {
    latest_snapshots(features)
        .iter()
        .map(|snapshot| assess_snapshot(snapshot, classifier))
        .collect()
}

/// Critical alerts and High/Medium recommendations, both in equipment order
pub fn evaluate<C: FailureClassifier + ?Sized>(
    features: &[FeatureRow],
    classifier: &C,
) -> Result<(Vec<Alert>, Vec<Recommendation>), ModelError> {
    Ok(partition(&assess(features, classifier)?))
}

pub fn partition(results: &[AlertResult]) -> (Vec<Alert>, Vec<Recommendation>) {
    let alerts = results.iter().filter_map(AlertResult::alert).collect();
    let recommendations = results.iter().filter_map(AlertResult::recommendation).collect();
    (alerts, recommendations)
}

pub fn assess_snapshot<C: FailureClassifier + ?Sized>(
    snapshot: &Snapshot<'_>,
    classifier: &C,
) -> Result<AlertResult, ModelError> {
    let p = checked_probability(classifier.predict_probability(&snapshot.vector())?)?;
    let severity = classify_probability(p);

    let (messages, actions) = match severity {
        Severity::Critical => (critical_messages(snapshot, p), critical_actions(snapshot)),
        Severity::Moderate => (Vec::new(), moderate_actions(snapshot)),
        Severity::None => (Vec::new(), Vec::new()),
    };

    Ok(AlertResult {
        equipment_id: snapshot.equipment_id(),
        equipment_name: snapshot.equipment_name().to_string(),
        failure_probability: p,
        severity,
        messages,
        actions,
    })
}

// ============================================================================
// MESSAGES
// ============================================================================

fn critical_messages(snapshot: &Snapshot<'_>, p: f64) -> Vec<String> {
    vec![
        format!("Critical failure probability ({:.0}%)", p * 100.0),
        format!("Expected symptom: {}", snapshot.last_symptom.unwrap_or(UNKNOWN_SYMPTOM)),
    ]
}

fn critical_actions(snapshot: &Snapshot<'_>) -> Vec<String> {
    let mut actions = vec![format!(
        "Perform immediate inspection within the next {}h",
        CRITICAL_INSPECTION_HOURS
    )];
    if let Some(parts) = snapshot.last_replaced_parts {
        actions.push(format!("Check {}", parts));
    }
    if let Some(cause) = snapshot.last_failure_cause.filter(|c| is_known(c)) {
        actions.push(format!("Monitor {}", cause));
    }
    actions
}

fn moderate_actions(snapshot: &Snapshot<'_>) -> Vec<String> {
    vec![
        format!(
            "Schedule preventive maintenance within the next {}h",
            MODERATE_MAINTENANCE_HOURS
        ),
        format!("Check vibration trend: {:.1} mm/s", snapshot.row.vibration),
    ]
}

/// "N/A" is how the data source writes "no cause"
fn is_known(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("n/a")
}
