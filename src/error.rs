use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("decoder `{0}` is not installed")]
    ToolMissing(String),
    #[error("decoder exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("failed to run decoder: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum LnkError {
    #[error("decoder `{0}` is not installed")]
    ToolMissing(String),
    #[error("failed to decode {path:?}: {reason}")]
    DecodeFailed { path: PathBuf, reason: String },
    #[error("no `Local path` or `Network path` field in report for {0:?}")]
    NoPathField(PathBuf),
    #[error("`{0}` was not found under the search root")]
    TargetNotFound(String),
    #[error("shortcut {0:?} does not exist")]
    Missing(PathBuf),
}

impl LnkError {
    /// True when no further `.lnk` file can succeed in this run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LnkError::ToolMissing(_))
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Lnk(#[from] LnkError),
    #[error("no usable URL line in {0:?}")]
    NoUrl(PathBuf),
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("refusing to write an incomplete entry for {0:?}")]
    Incomplete(PathBuf),
    #[error("{0:?} already exists")]
    Exists(PathBuf),
    #[error("permission denied writing {0:?}")]
    PermissionDenied(PathBuf),
    #[error("no such file or directory: {0:?}")]
    NotFound(PathBuf),
    #[error("failed to write {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl WriteError {
    pub fn from_io(path: PathBuf, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::AlreadyExists => WriteError::Exists(path),
            io::ErrorKind::PermissionDenied => WriteError::PermissionDenied(path),
            io::ErrorKind::NotFound => WriteError::NotFound(path),
            _ => WriteError::Io { path, source: err },
        }
    }
}

#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("failed to create backup folder {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to move {from:?} to {to:?}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("{0:?} has no file name")]
    NoFileName(PathBuf),
}
