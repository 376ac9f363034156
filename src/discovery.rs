//! Skill repository discovery utilities.
//!
//! This module resolves the repository to install from (a local directory or
//! a git URL cloned into a temporary directory), enumerates the skills in it,
//! and detects which target assistants are present on the host.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::ResolveError;
use crate::frontmatter::description_field;
use crate::layout::{detect_layout, has_instruction_file};
use crate::targets::{Environment, Target};

/// How long a clone may run before it is abandoned.
pub const CLONE_TIMEOUT: Duration = Duration::from_secs(60);

const CLONE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A skill repository ready to read from.
///
/// A cloned repository lives in a temporary directory that is removed when
/// this value is dropped or [`ResolvedRepository::close`]d, unless
/// [`ResolvedRepository::keep`] is called.
#[derive(Debug)]
pub struct ResolvedRepository {
    /// Directory containing the skill directories.
    pub root: PathBuf,
    clone: Option<TempDir>,
}

impl ResolvedRepository {
    /// A repository already on disk.
    pub fn local(root: PathBuf) -> Self {
        Self { root, clone: None }
    }

    pub fn is_cloned(&self) -> bool {
        self.clone.is_some()
    }

    /// Keep a cloned checkout on disk and return its location.
    pub fn keep(mut self) -> Option<PathBuf> {
        self.clone.take().map(TempDir::keep)
    }

    /// Remove a cloned checkout, reporting a failed removal.
    ///
    /// Does nothing for a local repository.
    pub fn close(mut self) -> io::Result<()> {
        match self.clone.take() {
            Some(checkout) => checkout.close(),
            None => Ok(()),
        }
    }
}

/// Whether a repository argument is a git URL rather than a local path.
pub fn is_url(source: &str) -> bool {
    source.starts_with("git@")
        || ["http://", "https://", "git://"]
            .iter()
            .any(|scheme| source.starts_with(scheme))
}

/// Resolve a repository argument to a directory of skills.
///
/// URLs are shallow-cloned. `sub_dir`, when given, selects the skills root
/// inside the repository.
pub fn resolve_repository(
    source: &str,
    sub_dir: Option<&str>,
) -> Result<ResolvedRepository, ResolveError> {
    let mut repository = if is_url(source) {
        let checkout = tempfile::Builder::new()
            .prefix("skillxfer-")
            .tempdir()
            .map_err(ResolveError::TempDir)?;
        info!(url = source, dest = %checkout.path().display(), "cloning repository");
        clone_repository(source, checkout.path(), CLONE_TIMEOUT)?;
        ResolvedRepository {
            root: checkout.path().to_path_buf(),
            clone: Some(checkout),
        }
    } else {
        let path = PathBuf::from(source);
        let path = fs::canonicalize(&path).map_err(|_| ResolveError::NotFound(path.clone()))?;
        if !path.is_dir() {
            return Err(ResolveError::NotADirectory(path));
        }
        ResolvedRepository::local(path)
    };

    if let Some(sub_dir) = sub_dir {
        let root = repository.root.join(sub_dir.trim_matches('/'));
        if !root.is_dir() {
            return Err(ResolveError::SubdirNotFound(root));
        }
        repository.root = root;
    }

    Ok(repository)
}

/// Shallow-clone `url` into `dest`, giving up after `timeout`.
pub fn clone_repository(url: &str, dest: &Path, timeout: Duration) -> Result<(), ResolveError> {
    let mut child = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet", url])
        .arg(dest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ResolveError::GitUnavailable)?;

    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => return Ok(()),
            Ok(Some(status)) => {
                let mut stderr = String::new();
                if let Some(mut pipe) = child.stderr.take() {
                    let _ = pipe.read_to_string(&mut stderr);
                }
                let message = if stderr.trim().is_empty() {
                    status.to_string()
                } else {
                    stderr.trim().to_string()
                };
                return Err(ResolveError::CloneFailed(message));
            }
            Ok(None) if started.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ResolveError::CloneTimedOut(timeout.as_secs()));
            }
            Ok(None) => thread::sleep(CLONE_POLL_INTERVAL),
            Err(err) => return Err(ResolveError::GitUnavailable(err)),
        }
    }
}

/// Names of the skills in a repository, sorted.
///
/// A skill is a visible directory with `SKILL.md` directly inside it or in
/// its `skills/` subdirectory.
pub fn available_skills(repo_root: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(repo_root) else {
        return Vec::new();
    };

    let mut skills: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || !has_instruction_file(&entry.path()) {
                return None;
            }
            Some(name)
        })
        .collect();
    skills.sort();
    debug!(count = skills.len(), root = %repo_root.display(), "discovered skills");
    skills
}

/// The frontmatter description of a skill, if it has one.
pub fn skill_description(skill_dir: &Path) -> Option<String> {
    let layout = detect_layout(skill_dir);
    let content = fs::read_to_string(&layout.instruction_file).ok()?;
    description_field(&content)
}

/// Targets that appear to be installed on this host.
pub fn detect_installed_targets(env: &Environment) -> Vec<Target> {
    let home = env.home();
    Target::ALL
        .into_iter()
        .filter(|target| match target {
            Target::Opencode => env.has_executable("opencode") || home.join(".opencode").exists(),
            Target::Codex => env.has_executable("codex"),
            Target::Gemini => env.has_executable("gemini") || home.join(".gemini").exists(),
            Target::Droid => env.has_executable("droid") || home.join(".factory").exists(),
            Target::Cursor => env.has_executable("cursor") || home.join(".cursor").exists(),
            Target::Antigravity => {
                env.cwd.join(".agent").exists() || home.join(".gemini").join("antigravity").exists()
            }
        })
        .collect()
}

/// Convert a path to a display-friendly relative path.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(|rel| rel.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    #[test]
    fn available_skills_finds_flat_and_nested() {
        let dir = TempDir::new().expect("temp dir");
        let root = dir.path();
        write(&root.join("beta/SKILL.md"), "# Beta\n");
        write(&root.join("alpha/skills/SKILL.md"), "# Alpha\n");
        write(&root.join(".hidden/SKILL.md"), "# Hidden\n");
        write(&root.join("notes/README.md"), "not a skill");
        write(&root.join("SKILL.md"), "root file is not a skill dir");

        assert_eq!(available_skills(root), vec!["alpha", "beta"]);
    }

    #[test]
    fn available_skills_on_missing_root() {
        assert!(available_skills(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn skill_description_reads_either_placement() {
        let dir = TempDir::new().expect("temp dir");
        write(
            &dir.path().join("a/skills/SKILL.md"),
            "---\ndescription: Nested one\n---\n",
        );
        write(&dir.path().join("b/SKILL.md"), "# No header\n");

        assert_eq!(
            skill_description(&dir.path().join("a")),
            Some("Nested one".to_string())
        );
        assert_eq!(skill_description(&dir.path().join("b")), None);
    }

    #[test]
    fn url_detection() {
        assert!(is_url("https://github.com/user/skills"));
        assert!(is_url("git@github.com:user/skills.git"));
        assert!(is_url("git://example.com/skills"));
        assert!(!is_url("/tmp/skills"));
        assert!(!is_url("skills"));
    }

    #[test]
    fn resolve_local_repository_and_sub_dir() {
        let dir = TempDir::new().expect("temp dir");
        fs::create_dir_all(dir.path().join("parent/skills")).expect("mkdir");
        let source = dir.path().to_str().unwrap();

        let repository = resolve_repository(source, None).expect("resolve");
        assert!(!repository.is_cloned());
        assert_eq!(repository.root, fs::canonicalize(dir.path()).unwrap());

        let repository = resolve_repository(source, Some("/parent/skills/")).expect("resolve");
        assert!(repository.root.ends_with("parent/skills"));

        let err = resolve_repository(source, Some("missing")).unwrap_err();
        assert!(matches!(err, ResolveError::SubdirNotFound(_)));
    }

    #[test]
    fn close_removes_checkout_and_keep_retains_it() {
        let dir = TempDir::new().expect("temp dir");
        let checkout = TempDir::new_in(dir.path()).expect("checkout");
        let path = checkout.path().to_path_buf();
        let repository = ResolvedRepository {
            root: path.clone(),
            clone: Some(checkout),
        };
        assert!(repository.is_cloned());
        repository.close().expect("close");
        assert!(!path.exists());

        let checkout = TempDir::new_in(dir.path()).expect("checkout");
        let repository = ResolvedRepository {
            root: checkout.path().to_path_buf(),
            clone: Some(checkout),
        };
        let kept = repository.keep().expect("kept path");
        assert!(kept.is_dir());

        let local = ResolvedRepository::local(dir.path().to_path_buf());
        local.close().expect("close local");
        assert!(dir.path().is_dir());
    }

    #[test]
    fn resolve_rejects_missing_and_file_paths() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("missing");
        let err = resolve_repository(missing.to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));

        let file = dir.path().join("file");
        fs::write(&file, "x").expect("write");
        let err = resolve_repository(file.to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, ResolveError::NotADirectory(_)));
    }

    #[test]
    fn clone_of_unreachable_repository_fails() {
        let dir = TempDir::new().expect("temp dir");
        let err = clone_repository(
            "https://127.0.0.1:9/missing.git",
            &dir.path().join("checkout"),
            Duration::from_secs(20),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::CloneFailed(_)
                | ResolveError::GitUnavailable(_)
                | ResolveError::CloneTimedOut(_)
        ));
    }

    #[test]
    fn detects_targets_from_markers() {
        let dir = TempDir::new().expect("temp dir");
        let home = dir.path().join("home");
        let cwd = dir.path().join("project");
        fs::create_dir_all(home.join(".cursor")).expect("mkdir");
        fs::create_dir_all(home.join(".factory")).expect("mkdir");
        fs::create_dir_all(cwd.join(".agent")).expect("mkdir");

        let env = Environment::fixed(&cwd, Some(home));
        assert_eq!(
            detect_installed_targets(&env),
            vec![Target::Droid, Target::Cursor, Target::Antigravity]
        );
    }

    #[test]
    fn detects_nothing_on_bare_host() {
        let dir = TempDir::new().expect("temp dir");
        let env = Environment::fixed(dir.path(), Some(dir.path().join("home")));
        assert!(detect_installed_targets(&env).is_empty());
    }

    #[test]
    fn display_path_strips_root() {
        let root = Path::new("/repo");
        assert_eq!(display_path(Path::new("/repo/a/b"), root), "a/b");
        assert_eq!(display_path(Path::new("/other"), root), "/other");
    }
}
