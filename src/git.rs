//! Thin wrapper around the `git` executable.
//!
//! Every query runs `git -C <repo> ...` and returns the trimmed standard
//! output. A non-zero exit status becomes [`GitInjectError::Git`] carrying
//! the trimmed standard error.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use tracing::debug;

use crate::{GitInjectError, GitInjectResult};

/// Default executable looked up on `PATH`.
pub const DEFAULT_GIT_BIN: &str = "git";

/// Handle to a git executable.
#[derive(Clone, Debug)]
pub struct Git {
    bin: PathBuf,
}

impl Default for Git {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_BIN)
    }
}

impl Git {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Full hash of the commit HEAD points to.
    pub fn head_sha(&self, repo: &Path) -> GitInjectResult<String> {
        self.exec(repo, &["rev-parse", "--verify", "HEAD"])
    }

    /// Nearest tag reachable from HEAD, e.g. `v1.2.3` or `v1.2.3-4-gdeadbee`.
    pub fn describe_tag(&self, repo: &Path) -> GitInjectResult<String> {
        self.exec(repo, &["describe", "--tags", "HEAD"])
    }

    fn exec(&self, repo: &Path, args: &[&str]) -> GitInjectResult<String> {
        debug!(bin = %self.bin.display(), repo = %repo.display(), ?args, "running git");
        let output = Command::new(&self.bin)
            .arg("-C")
            .arg(repo)
            .args(args)
            .output()
            .map_err(|source| GitInjectError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(GitInjectError::Git {
                args: args.join(" "),
                repo: repo.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
