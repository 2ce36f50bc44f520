//! Terminal Report
//!
//! Plain-text rendering of a scan report, shared by the `scan` command and
//! the dashboard panes.

use crate::logic::alerts::{Alert, Recommendation};
use crate::logic::scan::ScanReport;

pub const ALERTS_HEADER: &str = "CRITICAL ALERTS:";
pub const RECOMMENDATIONS_HEADER: &str = "MAINTENANCE RECOMMENDATIONS:";

/// Lines of the critical alerts section, without header
pub fn alert_lines(alerts: &[Alert]) -> Vec<String> {
    if alerts.is_empty() {
        return vec!["No critical alerts.".to_string()];
    }

    let mut lines = Vec::new();
    for alert in alerts {
        lines.push(format!(
            "[!] ALERT: {} (Equipment ID {})",
            alert.equipment_name, alert.equipment_id
        ));
        lines.extend(alert.messages.iter().map(|m| format!("  - {}", m)));
    }
    lines
}

/// Lines of the recommendations section, without header
pub fn recommendation_lines(recommendations: &[Recommendation]) -> Vec<String> {
    if recommendations.is_empty() {
        return vec!["No maintenance recommendations.".to_string()];
    }

    let mut lines = Vec::new();
    for rec in recommendations {
        lines.push(format!(
            "[{}] {} (Equipment ID {}):",
            rec.priority, rec.equipment_name, rec.equipment_id
        ));
        lines.extend(rec.actions.iter().map(|a| format!("  • {}", a)));
    }
    lines
}

pub fn summary_line(report: &ScanReport) -> String {
    format!(
        "Scan {} | {} equipment | {} feature rows | {} ms | holdout {}",
        report.scan_id,
        report.equipment,
        report.feature_rows,
        report.duration_ms(),
        report.metrics.summary()
    )
}

/// Both sections, as printed by `scan`
pub fn render_report(report: &ScanReport) -> String {
    let mut out = Vec::new();
    out.push(ALERTS_HEADER.to_string());
    out.extend(alert_lines(&report.alerts));
    out.push(String::new());
    out.push(RECOMMENDATIONS_HEADER.to_string());
    out.extend(recommendation_lines(&report.recommendations));
    out.join("\n")
}

pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
