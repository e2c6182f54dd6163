//! Resolve a repository's version tag and commit hash, and persist them as
//! two plain-text files for embedding into a build artifact.

pub use command::Command;
pub use error::{GitInjectError, GitInjectResult};
pub use git::Git;
pub use version::{
    DEFAULT_FALLBACK_VERSION, DEFAULT_GEN_DIR, GenDir, Resolver, SHA_FILE, VERSION_FILE,
    VersionInfo, is_semver,
};

mod command;
/// Error types
pub mod error;
/// Git executable wrapper
pub mod git;
mod version;
