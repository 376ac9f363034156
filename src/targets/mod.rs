//! Target assistants and their installation conventions.
//!
//! Each supported assistant has a [`TargetAdapter`]. The trait's default
//! methods implement the shared pipeline (detect layout, collect content,
//! rewrite the instruction document, write the bundle); variants override
//! only what differs for them.

mod antigravity;
mod codex;
mod cursor;
mod droid;
mod gemini;
mod opencode;

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::collect::collect_content;
use crate::error::{UnknownTarget, WriteError};
use crate::layout::detect_layout;
use crate::skill::{
    ContentMap, SkillOutput, DOCS_DIR, EXAMPLES_DIR, SCRIPTS_DIR, SKILL_MD, TEMPLATES_DIR,
};
use crate::transform::read_instruction;

pub use antigravity::AntigravityAdapter;
pub use codex::CodexAdapter;
pub use cursor::CursorAdapter;
pub use droid::DroidAdapter;
pub use gemini::GeminiAdapter;
pub use opencode::OpenCodeAdapter;

/// A supported destination assistant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    Opencode,
    Codex,
    Gemini,
    Droid,
    Cursor,
    Antigravity,
}

impl Target {
    /// Every target, in registry order.
    pub const ALL: [Self; 6] = [
        Self::Opencode,
        Self::Codex,
        Self::Gemini,
        Self::Droid,
        Self::Cursor,
        Self::Antigravity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opencode => "opencode",
            Self::Codex => "codex",
            Self::Gemini => "gemini",
            Self::Droid => "droid",
            Self::Cursor => "cursor",
            Self::Antigravity => "antigravity",
        }
    }

    /// The adapter implementing this target's conventions.
    pub fn adapter(self) -> Box<dyn TargetAdapter> {
        match self {
            Self::Opencode => Box::new(OpenCodeAdapter),
            Self::Codex => Box::new(CodexAdapter),
            Self::Gemini => Box::new(GeminiAdapter),
            Self::Droid => Box::new(DroidAdapter),
            Self::Cursor => Box::new(CursorAdapter),
            Self::Antigravity => Box::new(AntigravityAdapter),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str() == name)
            .ok_or_else(|| UnknownTarget {
                name: name.to_string(),
                supported: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

/// Host state consulted when choosing default locations.
///
/// Kept apart from the adapters so tests can pin every value.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub cwd: PathBuf,
    pub home_dir: Option<PathBuf>,
    /// Search path for executables (`PATH`).
    pub path: Option<OsString>,
}

impl Environment {
    /// Snapshot the current process environment.
    pub fn current() -> io::Result<Self> {
        Ok(Self {
            cwd: std::env::current_dir()?,
            home_dir: dirs::home_dir(),
            path: std::env::var_os("PATH"),
        })
    }

    /// An environment with no executables on the search path.
    pub fn fixed(cwd: impl Into<PathBuf>, home_dir: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home_dir,
            path: None,
        }
    }

    /// The home directory, or the working directory when it is unknown.
    pub fn home(&self) -> &Path {
        self.home_dir.as_deref().unwrap_or(&self.cwd)
    }

    /// Whether `name` resolves to an executable on the search path.
    pub fn has_executable(&self, name: &str) -> bool {
        self.path.as_ref().is_some_and(|path| {
            which::which_in(name, Some(path), &self.cwd).is_ok()
        })
    }
}

/// Output directory name for each content category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirNames {
    pub scripts: &'static str,
    pub templates: &'static str,
    pub docs: &'static str,
    pub examples: &'static str,
}

impl Default for DirNames {
    fn default() -> Self {
        Self {
            scripts: SCRIPTS_DIR,
            templates: TEMPLATES_DIR,
            docs: DOCS_DIR,
            examples: EXAMPLES_DIR,
        }
    }
}

/// Installation convention and transformation for one target.
pub trait TargetAdapter {
    fn target(&self) -> Target;

    /// Absolute directory skills are installed under by default.
    fn default_install_root(&self, env: &Environment) -> PathBuf;

    /// The install root relative to a custom base directory.
    fn relative_install_root(&self) -> PathBuf;

    /// Directory name a skill is installed as.
    fn installed_name(&self, skill_name: &str) -> String {
        skill_name.to_string()
    }

    fn dir_names(&self) -> DirNames {
        DirNames::default()
    }

    /// Rewrite the instruction document for this target.
    fn transform_instruction(&self, content: &str, skill_name: &str) -> String;

    /// Build the output bundle for the skill in `source_dir`.
    fn transform(&self, source_dir: &Path) -> SkillOutput {
        transform_skill(self, source_dir)
    }

    /// Write a bundle into `target_dir`, creating it if needed.
    fn write(&self, output: &SkillOutput, target_dir: &Path) -> Result<(), WriteError> {
        create_dir(target_dir)?;
        write_file(&target_dir.join(SKILL_MD), &output.instruction)?;
        write_categories(output, target_dir, self.dir_names())?;
        write_extra_files(&output.target_specific, target_dir)
    }

    /// Where a skill ends up, under `base` when one is given.
    fn install_dir(&self, skill_name: &str, env: &Environment, base: Option<&Path>) -> PathBuf {
        let name = self.installed_name(skill_name);
        match base {
            Some(base) => base.join(self.relative_install_root()).join(name),
            None => self.default_install_root(env).join(name),
        }
    }
}

/// The shared pipeline: detect, collect, then rewrite the instruction file.
pub fn transform_skill<A>(adapter: &A, source_dir: &Path) -> SkillOutput
where
    A: TargetAdapter + ?Sized,
{
    let layout = detect_layout(source_dir);
    let mut output = collect_content(&layout);
    output.instruction = match read_instruction(&layout) {
        Ok(content) => adapter.transform_instruction(&content, &layout.skill_name()),
        Err(placeholder) => placeholder,
    };
    output
}

pub(crate) fn create_dir(path: &Path) -> Result<(), WriteError> {
    fs::create_dir_all(path).map_err(|source| WriteError::CreateDirFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write one file, creating its parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, content).map_err(|source| WriteError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_category(dir: &Path, files: &ContentMap) -> Result<(), WriteError> {
    for (rel_path, content) in files {
        write_file(&dir.join(rel_path), content)?;
    }
    Ok(())
}

/// Write every non-empty category under its target directory name.
pub(crate) fn write_categories(
    output: &SkillOutput,
    target_dir: &Path,
    names: DirNames,
) -> Result<(), WriteError> {
    let categories = [
        (names.scripts, &output.scripts),
        (names.templates, &output.templates),
        (names.docs, &output.docs),
        (names.examples, &output.examples),
    ];
    for (dir_name, files) in categories {
        if !files.is_empty() {
            write_category(&target_dir.join(dir_name), files)?;
        }
    }
    Ok(())
}

pub(crate) fn write_extra_files(files: &ContentMap, target_dir: &Path) -> Result<(), WriteError> {
    write_category(target_dir, files)
}
