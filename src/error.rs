//! Error types for skillxfer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when splitting SKILL.md frontmatter.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file does not start with a frontmatter delimiter.
    #[error("SKILL.md must start with YAML frontmatter (---)")]
    MissingFrontmatter,

    /// The frontmatter is not properly closed with a second delimiter.
    #[error("SKILL.md frontmatter not properly closed with ---")]
    UnclosedFrontmatter,
}

/// Errors that can occur while writing a transformed skill.
///
/// Writes stop at the first failure; files already written stay on disk.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create an output directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a previous installation.
    #[error("Failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that fail a single skill and target combination.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The skill directory does not exist.
    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    /// The skill has no SKILL.md in either supported location.
    #[error("Invalid skill (no SKILL.md found): {0}")]
    MissingInstruction(String),

    /// Writing the output failed.
    #[error("{0}")]
    Write(#[from] WriteError),
}

/// Errors that can occur when resolving a skill repository.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The local path does not exist.
    #[error("Repository not found: {0}")]
    NotFound(PathBuf),

    /// The local path is not a directory.
    #[error("Repository path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The requested subdirectory does not exist.
    #[error("Subdirectory not found: {0}")]
    SubdirNotFound(PathBuf),

    /// A temporary directory for the clone could not be created.
    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// git could not be started.
    #[error("Failed to run git (is it installed?): {0}")]
    GitUnavailable(#[source] std::io::Error),

    /// git exited unsuccessfully.
    #[error("Git clone failed: {0}")]
    CloneFailed(String),

    /// The clone did not finish in time.
    #[error("Repository clone timed out after {0} seconds")]
    CloneTimedOut(u64),
}

/// The target identifier is not one of the registered targets.
#[derive(Debug, Error)]
#[error("Unknown target: {name} (supported: {supported})")]
pub struct UnknownTarget {
    pub name: String,
    pub supported: String,
}
