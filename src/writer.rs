use crate::error::WriteError;
use crate::model::ShortcutRecord;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DESKTOP_EXT: &str = "desktop";

pub fn destination_for(origin: &Path) -> PathBuf {
    origin.with_extension(DESKTOP_EXT)
}

/// Writes `record` beside `origin` as `<stem>.desktop` and returns the new path.
/// An existing file at that path is never replaced.
pub fn write_entry(record: &ShortcutRecord, origin: &Path) -> Result<PathBuf, WriteError> {
    if !record.is_complete() {
        return Err(WriteError::Incomplete(origin.to_path_buf()));
    }
    let destination = destination_for(origin);
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&destination)
        .map_err(|e| WriteError::from_io(destination.clone(), e))?;
    if let Err(e) = file.write_all(record.to_string().as_bytes()) {
        let _ = fs::remove_file(&destination);
        return Err(WriteError::from_io(destination, e));
    }
    Ok(destination)
}
