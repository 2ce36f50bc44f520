use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use super::record::ScanRecord;
use super::history_files;

/// Merge every history file into one JSONL file, oldest first.
/// Returns the number of source files merged.
pub fn to_jsonl(source_dir: &Path, target_path: &Path) -> io::Result<usize> {
    if !source_dir.exists() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "History directory not found"));
    }

    let mut output_file = File::create(target_path)?;
    let mut file_count = 0;

    for path in history_files(source_dir)? {
        let content = fs::read(&path)?;
        output_file.write_all(&content)?;

        if let Some(&last_byte) = content.last() {
            if last_byte != b'\n' {
                output_file.write_all(b"\n")?;
            }
        }

        file_count += 1;
    }

    output_file.flush()?;
    log::info!("Exported {} history files to {}", file_count, target_path.display());
    Ok(file_count)
}

/// Every parseable record, oldest first. Unparseable lines are skipped.
pub fn read_records(source_dir: &Path) -> io::Result<Vec<ScanRecord>> {
    let mut records = Vec::new();

    for path in history_files(source_dir)? {
        let reader = BufReader::new(File::open(&path)?);
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ScanRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping {}:{}: {}", path.display(), n + 1, e),
            }
        }
    }

    Ok(records)
}
