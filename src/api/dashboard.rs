//! Interactive Dashboard
//!
//! Two scrollable panes (alerts, recommendations) over a console terminal.
//! Enter triggers a scan on a worker thread; the panes are cleared and
//! refilled when it finishes. j/k scroll, Tab switches pane, q quits.

use std::sync::Arc;
use std::thread;
use console::{style, Key, Term};
use parking_lot::Mutex;

use crate::constants::{APP_NAME, APP_VERSION};
use crate::logic::config::PipelineConfig;
use crate::logic::scan::{run_with_permit, scan_gate, PipelineError, ScanGate, ScanPermit, ScanReport};
use super::terminal::{alert_lines, recommendation_lines, summary_line, ALERTS_HEADER, RECOMMENDATIONS_HEADER};

// ============================================================================
// PANE
// ============================================================================

/// A text buffer with a scroll offset
#[derive(Debug, Clone, Default)]
pub struct Pane {
    pub title: String,
    lines: Vec<String>,
    offset: usize,
}

impl Pane {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Replace the whole buffer and scroll back to the top
    pub fn set_content(&mut self, lines: Vec<String>) {
        self.lines.clear();
        self.lines.extend(lines);
        self.offset = 0;
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn scroll_down(&mut self) {
        if self.offset + 1 < self.lines.len() {
            self.offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn visible(&self, height: usize) -> &[String] {
        let end = (self.offset + height).min(self.lines.len());
        &self.lines[self.offset.min(end)..end]
    }
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Alerts,
    Recommendations,
}

#[derive(Debug)]
pub struct DashboardState {
    pub alerts: Pane,
    pub recommendations: Pane,
    pub status: String,
    pub focus: Focus,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            alerts: Pane::new(ALERTS_HEADER),
            recommendations: Pane::new(RECOMMENDATIONS_HEADER),
            status: "Press Enter to run a scan".to_string(),
            focus: Focus::Alerts,
        }
    }
}

impl DashboardState {
    /// Refresh both panes from a finished scan
    pub fn apply_report(&mut self, report: &ScanReport) {
        self.alerts.set_content(alert_lines(&report.alerts));
        self.recommendations.set_content(recommendation_lines(&report.recommendations));
        self.status = summary_line(report);
    }

    /// Take the gate for a new scan, or note that one is already running
    pub fn begin_scan<'g>(&mut self, gate: &'g ScanGate) -> Option<ScanPermit<'g>> {
        match gate.try_acquire() {
            Ok(permit) => {
                self.status = "Scanning...".to_string();
                Some(permit)
            }
            Err(e) => {
                log::warn!("Scan trigger ignored: {}", e);
                self.status = "Scan already in progress".to_string();
                None
            }
        }
    }

    /// Failed scans keep the previous panes
    pub fn apply_error(&mut self, error: &PipelineError) {
        self.status = format!("Scan failed: {}", error);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Alerts => Focus::Recommendations,
            Focus::Recommendations => Focus::Alerts,
        };
    }

    fn focused(&mut self) -> &mut Pane {
        match self.focus {
            Focus::Alerts => &mut self.alerts,
            Focus::Recommendations => &mut self.recommendations,
        }
    }

    pub fn scroll_down(&mut self) {
        self.focused().scroll_down();
    }

    pub fn scroll_up(&mut self) {
        self.focused().scroll_up();
    }

    /// Screen content for a terminal of `rows` lines
    pub fn frame(&self, rows: usize) -> Vec<String> {
        // title, status, blank, 2 pane titles, separator, key help
        let pane_height = rows.saturating_sub(7).max(2) / 2;

        let mut out = vec![
            format!("{} v{}", APP_NAME, APP_VERSION),
            self.status.clone(),
            String::new(),
        ];
        for (pane, focus) in [(&self.alerts, Focus::Alerts), (&self.recommendations, Focus::Recommendations)] {
            let marker = if self.focus == focus { ">" } else { " " };
            out.push(format!("{} {}", marker, pane.title));
            let visible = pane.visible(pane_height);
            out.extend(visible.iter().cloned());
            out.extend(std::iter::repeat(String::new()).take(pane_height - visible.len()));
        }
        out.push("─".repeat(40));
        out.push("Enter: scan   j/k: scroll   Tab: switch pane   q: quit".to_string());
        out
    }
}

// ============================================================================
// LOOP
// ============================================================================

fn draw(term: &Term, state: &DashboardState) -> std::io::Result<()> {
    let (rows, _) = term.size();
    let frame = state.frame(rows as usize);

    term.clear_screen()?;
    for (i, line) in frame.iter().enumerate() {
        let line = match i {
            0 => style(line).bold().to_string(),
            1 if line.starts_with("Scan failed") => style(line).red().to_string(),
            _ if line.starts_with("[!]") => style(line).red().bold().to_string(),
            _ => line.clone(),
        };
        term.write_line(&line)?;
    }
    Ok(())
}

fn render(term: &Term, state: &DashboardState) {
    if let Err(e) = draw(term, state) {
        log::debug!("Dashboard redraw failed: {}", e);
    }
}

fn trigger_scan(config: &PipelineConfig, state: &Arc<Mutex<DashboardState>>, term: &Term) {
    let Some(permit) = state.lock().begin_scan(scan_gate()) else {
        return;
    };
    render(term, &state.lock());

    let config = config.clone();
    let state = Arc::clone(state);
    let term = term.clone();
    thread::spawn(move || {
        let outcome = run_with_permit(&config, permit);
        let mut guard = state.lock();
        match outcome {
            Ok(report) => guard.apply_report(&report),
            Err(e) => {
                log::error!("Scan failed: {}", e);
                guard.apply_error(&e);
            }
        }
        render(&term, &guard);
    });
}

/// Run until the user quits
pub fn run(config: PipelineConfig) -> std::io::Result<()> {
    let term = Term::stdout();
    let state = Arc::new(Mutex::new(DashboardState::default()));

    log::info!("Dashboard started for workbook {}", config.workbook_path.display());
    term.hide_cursor()?;
    render(&term, &state.lock());

    loop {
        match term.read_key()? {
            Key::Enter => trigger_scan(&config, &state, &term),
            Key::Char('j') | Key::ArrowDown => state.lock().scroll_down(),
            Key::Char('k') | Key::ArrowUp => state.lock().scroll_up(),
            Key::Tab => state.lock().toggle_focus(),
            Key::Char('q') | Key::Escape => break,
            _ => continue,
        }
        render(&term, &state.lock());
    }

    term.show_cursor()?;
    term.clear_screen()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{} {}", prefix, i)).collect()
    }

    #[test]
    fn test_set_content_replaces_previous_lines() {
        let mut pane = Pane::new("Alerts");
        pane.set_content(lines("old", 5));
        pane.scroll_down();
        pane.set_content(lines("new", 2));

        assert_eq!(pane.lines(), &["new 0".to_string(), "new 1".to_string()]);
        assert_eq!(pane.offset(), 0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut pane = Pane::new("Alerts");
        pane.set_content(lines("l", 3));

        pane.scroll_up();
        assert_eq!(pane.offset(), 0);
        for _ in 0..10 {
            pane.scroll_down();
        }
        assert_eq!(pane.offset(), 2);
        assert_eq!(pane.visible(5), &["l 2".to_string()]);
    }

    #[test]
    fn test_scroll_follows_focus() {
        let mut state = DashboardState::default();
        state.alerts.set_content(lines("a", 4));
        state.recommendations.set_content(lines("r", 4));

        state.scroll_down();
        state.toggle_focus();
        state.scroll_down();
        state.scroll_down();

        assert_eq!(state.alerts.offset(), 1);
        assert_eq!(state.recommendations.offset(), 2);
    }

    #[test]
    fn test_error_keeps_previous_panes() {
        let mut state = DashboardState::default();
        state.alerts.set_content(lines("a", 2));
        state.apply_error(&PipelineError::ScanInProgress);

        assert_eq!(state.alerts.lines().len(), 2);
        assert!(state.status.starts_with("Scan failed"));
    }

    #[test]
    fn test_second_trigger_rejected_while_scan_runs() {
        let gate = ScanGate::new();
        let mut state = DashboardState::default();

        let permit = state.begin_scan(&gate).unwrap();
        assert_eq!(state.status, "Scanning...");

        assert!(state.begin_scan(&gate).is_none());
        assert_eq!(state.status, "Scan already in progress");
        assert!(gate.is_running());

        drop(permit);
        assert!(state.begin_scan(&gate).is_some());
    }

    #[test]
    fn test_frame_fits_terminal_height() {
        let mut state = DashboardState::default();
        state.alerts.set_content(lines("a", 50));
        state.recommendations.set_content(lines("r", 1));

        let frame = state.frame(27);
        assert_eq!(frame.len(), 27);
        assert!(frame.iter().any(|l| l == "> CRITICAL ALERTS:"));
        assert!(frame.iter().any(|l| l == "  MAINTENANCE RECOMMENDATIONS:"));
        assert!(frame.iter().any(|l| l == "r 0"));
        assert!(!frame.iter().any(|l| l == "a 49"));
    }
}
