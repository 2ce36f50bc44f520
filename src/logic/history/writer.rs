use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use chrono::Utc;
use parking_lot::Mutex;

use super::record::ScanRecord;
use super::is_history_file;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

pub struct HistoryWriter {
    file: Mutex<Option<File>>,
    base_dir: PathBuf,
    max_file_size: u64,
}

impl HistoryWriter {
    pub fn from_path(base_dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&base_dir) {
            log::warn!("Failed to create history directory {}: {}", base_dir.display(), e);
        }

        Self {
            file: Mutex::new(None),
            base_dir,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Rotate at `bytes` instead of 10 MB
    #[cfg(test)]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes.max(1);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Append one record as a JSON line, rotating when the file is full
    pub fn append(&self, record: &ScanRecord) -> io::Result<()> {
        let mut file_guard = self.file.lock();

        // Resume the newest file if it still has room
        if file_guard.is_none() {
            if let Some(path) = self.find_latest_file()? {
                let f = OpenOptions::new().create(true).append(true).open(&path)?;
                if f.metadata()?.len() < self.max_file_size {
                    *file_guard = Some(f);
                }
            }
        }

        let should_rotate = match file_guard.as_ref() {
            Some(f) => f.metadata()?.len() >= self.max_file_size,
            None => true,
        };
        if should_rotate {
            *file_guard = Some(self.create_new_file()?);
        }

        if let Some(file) = file_guard.as_mut() {
            let json = serde_json::to_string(record)?;
            writeln!(file, "{}", json)?;
        }

        Ok(())
    }

    fn create_new_file(&self) -> io::Result<File> {
        // scans-YYYY-MM-DD-HHMMSS-mmm.jsonl, sortable by name
        let filename = format!("scans-{}.jsonl", Utc::now().format("%Y-%m-%d-%H%M%S-%3f"));
        let path = self.base_dir.join(filename);
        log::debug!("Opening new history file: {}", path.display());

        OpenOptions::new().create(true).append(true).open(path)
    }

    fn find_latest_file(&self) -> io::Result<Option<PathBuf>> {
        let mut entries = fs::read_dir(&self.base_dir)?
            .filter_map(|res| res.ok())
            .map(|e| e.path())
            .filter(|p| is_history_file(p))
            .collect::<Vec<_>>();

        entries.sort();
        Ok(entries.pop())
    }
}
