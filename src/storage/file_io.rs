//! File I/O utilities with atomic writes
//!
//! Provides whole-file line reads and writes that won't corrupt data on
//! failure. Text is UTF-8; lines are written with `\n` and both `\n` and
//! `\r\n` are accepted when reading.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::TrackerError;

/// Read every line of a file, returning `None` if the file doesn't exist
///
/// Any other I/O failure (permissions, disk errors, invalid UTF-8) is an error.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Option<Vec<String>>, TrackerError> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(TrackerError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TrackerError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

    Ok(Some(lines))
}

/// Write lines to a file atomically (write to temp, then rename)
///
/// The previous contents are replaced completely; no backup is kept.
pub fn write_lines_atomic<P, I, S>(path: P, lines: I) -> Result<(), TrackerError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("csv.tmp");

    let result = write_and_sync(&temp_path, lines).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| TrackerError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_sync<I, S>(temp_path: &Path, lines: I) -> Result<(), TrackerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())
            .map_err(|e| TrackerError::Storage(format!("Failed to write data: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))
}
