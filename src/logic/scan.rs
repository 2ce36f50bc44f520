//! Scan Pipeline
//!
//! load workbook -> build features -> split -> train -> evaluate holdout ->
//! assess latest snapshots. Both the terminal report and the dashboard run
//! scans through here.

use std::sync::atomic::{AtomicBool, Ordering};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::logic::alerts::{self, Alert, Priority, Recommendation, Severity};
use crate::logic::config::PipelineConfig;
use crate::logic::features::{build_features_from_tables, latest_snapshots, FeatureRow};
use crate::logic::history;
use crate::logic::model::{
    evaluate_holdout, train_test_split, BalancedForest, HoldoutMetrics, ModelError, ModelMetadata,
    TrainingError,
};
use crate::logic::workbook::{load_workbook, SchemaError, WorkbookError};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    #[error("invalid workbook: {0}")]
    Schema(#[from] SchemaError),

    #[error("training failed: {0}")]
    Training(#[from] TrainingError),

    #[error("prediction failed: {0}")]
    Model(#[from] ModelError),

    #[error("a scan is already in progress")]
    ScanInProgress,
}

// ============================================================================
// SCAN GATE
// ============================================================================

/// At most one scan in flight
#[derive(Debug, Default)]
pub struct ScanGate {
    running: AtomicBool,
}

/// Held for the duration of a scan; releases the gate on drop
#[derive(Debug)]
pub struct ScanPermit<'a> {
    gate: &'a ScanGate,
}

impl ScanGate {
    pub const fn new() -> Self {
        Self { running: AtomicBool::new(false) }
    }

    pub fn try_acquire(&self) -> Result<ScanPermit<'_>, PipelineError> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ScanPermit { gate: self })
            .map_err(|_| PipelineError::ScanInProgress)
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        self.gate.running.store(false, Ordering::SeqCst);
    }
}

static SCAN_GATE: ScanGate = ScanGate::new();

/// Process-wide gate shared by every front end
pub fn scan_gate() -> &'static ScanGate {
    &SCAN_GATE
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub workbook: String,
    pub feature_rows: usize,
    pub equipment: usize,
    pub model: ModelMetadata,
    pub metrics: HoldoutMetrics,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
}

impl ScanReport {
    /// Equipment per tier; everything without a recommendation is `None`
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.alerts.len(),
            Severity::Moderate => self
                .recommendations
                .iter()
                .filter(|r| r.priority == Priority::Medium)
                .count(),
            Severity::None => self.equipment.saturating_sub(self.recommendations.len()),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

// ============================================================================
// RUN
// ============================================================================

/// Full scan against the configured workbook, guarded by `gate`.
/// History write failures are logged, never returned.
pub fn run_scan(config: &PipelineConfig, gate: &ScanGate) -> Result<ScanReport, PipelineError> {
    let permit = gate.try_acquire()?;
    run_with_permit(config, permit)
}

/// Same as `run_scan` for a caller that already holds the gate.
/// The gate is released when this returns.
pub fn run_with_permit(config: &PipelineConfig, _permit: ScanPermit<'_>) -> Result<ScanReport, PipelineError> {
    let started_at = Utc::now();

    let raw = load_workbook(&config.workbook_path)?;
    let rows = build_features_from_tables(&raw)?;

    let mut report = scan_features(&rows, config)?;
    report.started_at = started_at;
    report.workbook = config.workbook_path.display().to_string();

    if config.history_enabled {
        let dir = config
            .history_dir
            .clone()
            .unwrap_or_else(history::default_history_dir);
        history::record(&dir, &history::ScanRecord::from_report(&report));
    }

    Ok(report)
}

/// Train, evaluate and assess on already-built feature rows
pub fn scan_features(rows: &[FeatureRow], config: &PipelineConfig) -> Result<ScanReport, PipelineError> {
    let started_at = Utc::now();
    let scan_id = Uuid::new_v4();
    log::info!("Scan {} started: {} feature rows", scan_id, rows.len());

    let (train, test) = train_test_split(rows, config.test_fraction, config.split_seed);
    log::debug!("Split: {} train / {} test", train.len(), test.len());

    let forest = BalancedForest::fit(&train, &config.forest)?;
    let metrics = evaluate_holdout(&forest, &test)?;
    log::info!("Holdout metrics: {}", metrics.summary());

    let snapshots = latest_snapshots(rows);
    for snapshot in &snapshots {
        log::trace!("Equipment {} input: {}", snapshot.equipment_id(), snapshot.vector().to_log_entry());
    }

    let (alerts, recommendations) = alerts::evaluate(rows, &forest)?;
    let report = ScanReport {
        scan_id,
        started_at,
        finished_at: Utc::now(),
        workbook: String::new(),
        feature_rows: rows.len(),
        equipment: snapshots.len(),
        model: forest.metadata().clone(),
        metrics,
        alerts,
        recommendations,
    };

    log::info!(
        "Scan {} finished: {} equipment, {} critical, {} moderate",
        report.scan_id,
        report.equipment,
        report.count(Severity::Critical),
        report.count(Severity::Moderate)
    );

    Ok(report)
}
