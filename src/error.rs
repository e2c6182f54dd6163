use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Errors raised while resolving or persisting version information.
#[derive(Debug, Error)]
pub enum GitInjectError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Invalid gendir: {0}")]
    InvalidGenDir(String),
    #[error("failed to run {}: {source}", .bin.display())]
    Spawn { bin: PathBuf, source: io::Error },
    #[error("git {args} failed in {} ({status}): {stderr}", .repo.display())]
    Git {
        args: String,
        repo: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub type GitInjectResult<T> = Result<T, GitInjectError>;
