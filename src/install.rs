//! Installing skills for one target.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{InstallError, WriteError};
use crate::layout::has_instruction_file;
use crate::targets::{Environment, TargetAdapter};

/// What happened to one skill.
#[derive(Debug)]
pub enum InstallOutcome {
    /// Written to the given directory.
    Installed(PathBuf),
    /// Left alone because the directory already existed.
    Skipped(PathBuf),
    Failed(InstallError),
}

impl InstallOutcome {
    pub const fn is_installed(&self) -> bool {
        matches!(self, Self::Installed(_))
    }
}

/// Where a run's install directories are placed.
#[derive(Clone, Copy, Debug)]
pub struct InstallOptions<'a> {
    pub env: &'a Environment,
    /// Custom base directory replacing the target's default root.
    pub base: Option<&'a Path>,
    /// Replace existing installations instead of skipping them.
    pub force: bool,
}

/// Transform one skill and write it for `adapter`.
///
/// Returns the directory the skill was written to.
pub fn install_skill(
    adapter: &dyn TargetAdapter,
    skill_name: &str,
    repo_root: &Path,
    env: &Environment,
    base: Option<&Path>,
) -> Result<PathBuf, InstallError> {
    let source_dir = repo_root.join(skill_name);
    if !source_dir.is_dir() {
        return Err(InstallError::SkillNotFound(skill_name.to_string()));
    }
    if !has_instruction_file(&source_dir) {
        return Err(InstallError::MissingInstruction(skill_name.to_string()));
    }

    let output = adapter.transform(&source_dir);
    let target_dir = adapter.install_dir(skill_name, env, base);
    adapter.write(&output, &target_dir)?;
    info!(
        skill = skill_name,
        target = %adapter.target(),
        dest = %target_dir.display(),
        "installed skill"
    );
    Ok(target_dir)
}

/// Install each skill in turn, one outcome per skill in input order.
///
/// An existing installation is skipped unless `options.force` is set, in
/// which case it is removed first.
pub fn install_skills<S: AsRef<str>>(
    adapter: &dyn TargetAdapter,
    skills: &[S],
    repo_root: &Path,
    options: InstallOptions<'_>,
) -> Vec<InstallOutcome> {
    skills
        .iter()
        .map(|skill| {
            let skill = skill.as_ref();
            let target_dir = adapter.install_dir(skill, options.env, options.base);
            if target_dir.exists() {
                if !options.force {
                    warn!(
                        skill,
                        dest = %target_dir.display(),
                        "already installed, use --force to overwrite"
                    );
                    return InstallOutcome::Skipped(target_dir);
                }
                if let Err(source) = fs::remove_dir_all(&target_dir) {
                    return InstallOutcome::Failed(
                        WriteError::RemoveFailed {
                            path: target_dir,
                            source,
                        }
                        .into(),
                    );
                }
            }
            match install_skill(adapter, skill, repo_root, options.env, options.base) {
                Ok(path) => InstallOutcome::Installed(path),
                Err(err) => InstallOutcome::Failed(err),
            }
        })
        .collect()
}

/// Running totals across every target in a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub attempted: usize,
    pub installed: usize,
}

impl InstallSummary {
    pub fn record(&mut self, outcomes: &[InstallOutcome]) {
        self.attempted += outcomes.len();
        self.installed += outcomes.iter().filter(|o| o.is_installed()).count();
    }

    /// Zero only when something was installed.
    pub const fn exit_code(&self) -> i32 {
        if self.installed > 0 {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::Target;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        repo: PathBuf,
        base: PathBuf,
        env: Environment,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().expect("temp dir");
        let repo = dir.path().join("repo");
        let base = dir.path().join("dest");
        fs::create_dir_all(repo.join("fmt/scripts")).expect("mkdir");
        fs::write(
            repo.join("fmt/SKILL.md"),
            "---\ndescription: Formats code\n---\n# Fmt\n",
        )
        .expect("write");
        fs::write(repo.join("fmt/scripts/fmt.py"), "\"\"\"Format.\"\"\"\n").expect("write");
        fs::create_dir_all(repo.join("nested/skills")).expect("mkdir");
        fs::write(repo.join("nested/skills/SKILL.md"), "# Nested\n").expect("write");
        fs::create_dir_all(repo.join("empty")).expect("mkdir");
        let env = Environment::fixed(dir.path(), Some(dir.path().join("home")));
        Fixture {
            _dir: dir,
            repo,
            base,
            env,
        }
    }

    fn options<'a>(fx: &'a Fixture, force: bool) -> InstallOptions<'a> {
        InstallOptions {
            env: &fx.env,
            base: Some(&fx.base),
            force,
        }
    }

    #[test]
    fn installs_in_input_order_and_reports_failures() {
        let fx = fixture();
        let adapter = Target::Droid.adapter();
        let outcomes = install_skills(
            adapter.as_ref(),
            &["nested", "missing", "empty", "fmt"],
            &fx.repo,
            options(&fx, false),
        );

        assert_eq!(outcomes.len(), 4);
        assert!(
            matches!(&outcomes[0], InstallOutcome::Installed(p) if p.ends_with(".factory/skills/nested"))
        );
        assert!(matches!(
            &outcomes[1],
            InstallOutcome::Failed(InstallError::SkillNotFound(name)) if name == "missing"
        ));
        assert!(matches!(
            &outcomes[2],
            InstallOutcome::Failed(InstallError::MissingInstruction(name)) if name == "empty"
        ));
        assert!(outcomes[3].is_installed());
        assert!(fx.base.join(".factory/skills/fmt/scripts/fmt.py").is_file());
    }

    #[test]
    fn second_install_skips_unless_forced() {
        let fx = fixture();
        let adapter = Target::Gemini.adapter();
        let first = install_skills(adapter.as_ref(), &["fmt"], &fx.repo, options(&fx, false));
        assert!(first[0].is_installed());

        let dest = fx.base.join(".gemini/skills/fmt");
        fs::write(dest.join("stale.txt"), "left over").expect("write");

        let second = install_skills(adapter.as_ref(), &["fmt"], &fx.repo, options(&fx, false));
        assert!(matches!(&second[0], InstallOutcome::Skipped(p) if *p == dest));
        assert!(dest.join("stale.txt").is_file());

        let forced = install_skills(adapter.as_ref(), &["fmt"], &fx.repo, options(&fx, true));
        assert!(forced[0].is_installed());
        assert!(!dest.join("stale.txt").exists());
        assert!(dest.join("SKILL.md").is_file());
    }

    #[test]
    fn cursor_install_writes_rule_file() {
        let fx = fixture();
        let path = install_skill(
            Target::Cursor.adapter().as_ref(),
            "fmt",
            &fx.repo,
            &fx.env,
            Some(&fx.base),
        )
        .expect("install");
        assert_eq!(path, fx.base.join(".cursor/rules/fmt"));
        assert!(path.join("fmt.mdc").is_file());
        assert!(!path.join("SKILL.md").exists());
    }

    #[test]
    fn default_root_without_base() {
        let fx = fixture();
        let path = install_skill(
            Target::Gemini.adapter().as_ref(),
            "fmt",
            &fx.repo,
            &fx.env,
            None,
        )
        .expect("install");
        assert_eq!(path, fx.env.home().join(".gemini/skills/fmt"));
    }

    #[test]
    fn summary_counts_and_exit_code() {
        let mut summary = InstallSummary::default();
        assert_eq!(summary.exit_code(), 1);

        summary.record(&[
            InstallOutcome::Skipped(PathBuf::from("a")),
            InstallOutcome::Failed(InstallError::SkillNotFound("b".into())),
        ]);
        assert_eq!(summary, InstallSummary { attempted: 2, installed: 0 });
        assert_eq!(summary.exit_code(), 1);

        summary.record(&[InstallOutcome::Installed(PathBuf::from("c"))]);
        assert_eq!(summary, InstallSummary { attempted: 3, installed: 1 });
        assert_eq!(summary.exit_code(), 0);
    }
}
