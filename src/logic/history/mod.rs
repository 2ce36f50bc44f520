//! History Module - Scan Log
//!
//! Appends a summary of every scan to JSONL files with automatic rotation,
//! and exports or summarizes them on demand.

pub mod export;
pub mod record;
pub mod writer;


use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

pub use export::{read_records, to_jsonl};
pub use record::ScanRecord;
pub use writer::HistoryWriter;

use crate::constants::APP_DIR_NAME;

/// `<data_local_dir>/predictive-maintenance/history`
pub fn default_history_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("history")
}

// Global writer, reopened when a scan targets a different directory
static WRITER: Mutex<Option<HistoryWriter>> = Mutex::new(None);

/// Append a scan record. Failures are logged and swallowed.
pub fn record(dir: &Path, record: &ScanRecord) {
    let mut guard = WRITER.lock();

    if guard.as_ref().map_or(true, |w| w.base_dir() != dir) {
        *guard = Some(HistoryWriter::from_path(dir.to_path_buf()));
    }

    if let Some(w) = guard.as_ref() {
        match w.append(record) {
            Ok(()) => log::debug!("Scan {} recorded in {}", record.scan_id, dir.display()),
            Err(e) => log::error!("Failed to append to scan history: {}", e),
        }
    }
}

// ============================================================================
// FILES & STATS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_files: usize,
    pub total_size_mb: f32,
    pub current_file: String,
    pub total_scans: usize,
    /// Scans written with the running build's feature layout
    pub current_layout_scans: usize,
    pub last_scan: Option<chrono::DateTime<chrono::Utc>>,
}

pub(crate) fn is_history_file(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "jsonl")
}

/// History files sorted by name (= creation time)
pub fn history_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|r| r.ok())
        .map(|e| e.path())
        .filter(|p| is_history_file(p))
        .collect();
    paths.sort();
    Ok(paths)
}

pub fn stats(dir: &Path) -> io::Result<HistoryStats> {
    if !dir.exists() {
        return Ok(HistoryStats {
            current_file: "None".to_string(),
            ..Default::default()
        });
    }

    let files = history_files(dir)?;
    let size: u64 = files
        .iter()
        .filter_map(|p| fs::metadata(p).ok())
        .map(|m| m.len())
        .sum();
    let records = read_records(dir)?;

    Ok(HistoryStats {
        total_files: files.len(),
        total_size_mb: size as f32 / 1024.0 / 1024.0,
        current_file: files
            .last()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("None")
            .to_string(),
        total_scans: records.len(),
        current_layout_scans: records.iter().filter(|r| r.is_current_layout()).count(),
        last_scan: records.iter().map(|r| r.timestamp).max(),
    })
}
