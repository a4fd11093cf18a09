use crate::error::RelocateError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const BACKUP_FOLDER: &str = "backups_link";

/// Moves `source` into `backup_dir`, creating the folder on demand. An
/// existing file of the same name in the backup folder is replaced.
pub fn relocate(source: &Path, backup_dir: &Path) -> Result<PathBuf, RelocateError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| RelocateError::NoFileName(source.to_path_buf()))?;

    fs::create_dir_all(backup_dir).map_err(|source| RelocateError::CreateDir {
        path: backup_dir.to_path_buf(),
        source,
    })?;

    let destination = backup_dir.join(file_name);
    move_file(source, &destination).map_err(|e| RelocateError::Move {
        from: source.to_path_buf(),
        to: destination.clone(),
        source: e,
    })?;
    Ok(destination)
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        other => other,
    }
}
