use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::alerts::{Alert, Recommendation, Severity};
use crate::logic::features::{layout_hash, FEATURE_VERSION};
use crate::logic::model::HoldoutMetrics;
use crate::logic::scan::ScanReport;

/// One line of scan history
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub scan_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub workbook: String,

    // Feature contract
    pub feature_version: u8,
    pub layout_hash: u32,

    pub feature_rows: usize,
    pub equipment: usize,
    pub metrics: HoldoutMetrics,

    pub critical: usize,
    pub moderate: usize,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
}

impl ScanRecord {
    pub fn from_report(report: &ScanReport) -> Self {
        Self {
            scan_id: report.scan_id,
            timestamp: report.finished_at,
            workbook: report.workbook.clone(),
            feature_version: FEATURE_VERSION,
            layout_hash: report.model.layout_hash,
            feature_rows: report.feature_rows,
            equipment: report.equipment,
            metrics: report.metrics.clone(),
            critical: report.count(Severity::Critical),
            moderate: report.count(Severity::Moderate),
            alerts: report.alerts.clone(),
            recommendations: report.recommendations.clone(),
        }
    }

    /// Written by the running build's feature layout
    pub fn is_current_layout(&self) -> bool {
        self.feature_version == FEATURE_VERSION && self.layout_hash == layout_hash()
    }
}
