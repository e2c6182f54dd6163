use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bon::bon;
use lazy_regex::*;
use tracing::{debug, info, warn};

use crate::{GitInjectError, GitInjectResult, git::Git};

/// Directory `gen` writes to unless told otherwise.
pub const DEFAULT_GEN_DIR: &str = ".gitinject";
/// Version used when HEAD carries no semantic-version tag.
pub const DEFAULT_FALLBACK_VERSION: &str = "<dev>";
/// File holding the raw commit hash.
pub const SHA_FILE: &str = "sha";
/// File holding the raw version string.
pub const VERSION_FILE: &str = "version";

// https://semver.org/#is-there-a-suggested-regular-expression-regex-to-check-a-semver-string
static SEMVER: Lazy<Regex> = lazy_regex!(
    r"^v(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$"
);

/// Checks whether a tag is a `v`-prefixed semantic version.
pub fn is_semver(tag: &str) -> bool {
    SEMVER.is_match(tag)
}

/// Version string and commit hash of a repository at HEAD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub commit_id: String,
}

impl VersionInfo {
    /// Writes `sha` and `version` under `dir`, creating it if needed.
    pub fn write(&self, dir: &GenDir) -> GitInjectResult<()> {
        let dir = dir.path();
        fs::create_dir_all(dir).map_err(|source| GitInjectError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        for (name, contents) in [(SHA_FILE, &self.commit_id), (VERSION_FILE, &self.version)] {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|source| GitInjectError::Write { path, source })?;
        }
        info!(
            dir = %dir.display(),
            version = %self.version,
            sha = %self.commit_id,
            "generated version files"
        );
        Ok(())
    }

    /// Reads files previously produced by [`VersionInfo::write`].
    ///
    /// A missing or empty `version` file yields `fallback`, a missing `sha`
    /// file yields an empty commit id.
    pub fn load(dir: impl AsRef<Path>, fallback: &str) -> GitInjectResult<Self> {
        let dir = dir.as_ref();
        let version = read_optional(&dir.join(VERSION_FILE))?
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        let commit_id = read_optional(&dir.join(SHA_FILE))?.unwrap_or_default();
        Ok(Self { version, commit_id })
    }
}

fn read_optional(path: &Path) -> GitInjectResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(GitInjectError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// A relative, non-empty directory that generated files may be written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenDir(PathBuf);

impl GenDir {
    pub fn new(dir: &str) -> GitInjectResult<Self> {
        let path = Path::new(dir);
        if dir.is_empty() || path.has_root() || path.is_absolute() {
            return Err(GitInjectError::InvalidGenDir(dir.to_string()));
        }
        Ok(Self(path.to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Resolves [`VersionInfo`] for a repository.
#[derive(Debug)]
pub struct Resolver {
    fallback: String,
    git: Git,
    repo: PathBuf,
}

#[bon]
impl Resolver {
    #[builder]
    pub fn new(
        #[builder(start_fn, into)] repo: PathBuf,
        #[builder(into)] fallback: Option<String>,
        git: Option<Git>,
    ) -> Self {
        Self {
            fallback: fallback.unwrap_or_else(|| DEFAULT_FALLBACK_VERSION.to_string()),
            git: git.unwrap_or_default(),
            repo,
        }
    }

    /// The commit hash must resolve; a missing or non-semver tag falls back.
    pub fn resolve(&self) -> GitInjectResult<VersionInfo> {
        let commit_id = self.git.head_sha(&self.repo)?;
        let version = match self.git.describe_tag(&self.repo) {
            Ok(tag) if is_semver(&tag) => tag,
            Ok(tag) => {
                warn!(%tag, fallback = %self.fallback, "tag is not a semantic version");
                self.fallback.clone()
            }
            Err(e) => {
                debug!(error = %e, fallback = %self.fallback, "no tag reachable from HEAD");
                self.fallback.clone()
            }
        };
        Ok(VersionInfo { version, commit_id })
    }
}
