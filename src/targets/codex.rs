//! Codex CLI: `.codex/skills/<name>/` with `assets/` for templates and
//! `references/` for docs.

use std::path::PathBuf;

use super::{DirNames, Environment, Target, TargetAdapter};
use crate::skill::{ASSETS_DIR, REFERENCES_DIR};
use crate::transform::{append_section, common_transforms, rename_dir_references};

const USAGE_HEADING: &str = "## Codex CLI Usage";

#[derive(Debug, Default, Clone, Copy)]
pub struct CodexAdapter;

impl TargetAdapter for CodexAdapter {
    fn target(&self) -> Target {
        Target::Codex
    }

    fn default_install_root(&self, env: &Environment) -> PathBuf {
        env.cwd.join(self.relative_install_root())
    }

    fn relative_install_root(&self) -> PathBuf {
        PathBuf::from(".codex").join("skills")
    }

    fn dir_names(&self) -> DirNames {
        DirNames {
            templates: ASSETS_DIR,
            docs: REFERENCES_DIR,
            ..DirNames::default()
        }
    }

    fn transform_instruction(&self, content: &str, skill_name: &str) -> String {
        let names = self.dir_names();
        let mut content = rename_dir_references(
            &common_transforms(content),
            names.templates,
            names.docs,
        );
        let section = format!(
            "\n\n---\n\n{USAGE_HEADING}\n\n\
             Codex loads this skill from `.codex/skills/{skill_name}/` once skills are enabled.\n\n\
             ```bash\n\
             codex --enable skills\n\n\
             # Run a bundled script by hand\n\
             cd .codex/skills/{skill_name}/scripts\n\
             python <script_name>.py [arguments]\n\
             ```\n\n\
             ### Directory Structure\n\n\
             - `assets/` - templates\n\
             - `references/` - documentation\n\
             - `scripts/` - automation scripts (see `scripts/README.md`)\n"
        );
        append_section(&mut content, USAGE_HEADING, &section);
        content
    }
}
