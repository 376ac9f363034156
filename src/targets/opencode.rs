//! OpenCode: `.opencode/skill/<name>/`, or `.claude/skills/<name>/` when the
//! project already has that directory.

use std::path::PathBuf;

use super::{Environment, Target, TargetAdapter};
use crate::transform::{append_section, common_transforms};

const USAGE_HEADING: &str = "## OpenCode CLI Usage";

#[derive(Debug, Default, Clone, Copy)]
pub struct OpenCodeAdapter;

impl TargetAdapter for OpenCodeAdapter {
    fn target(&self) -> Target {
        Target::Opencode
    }

    fn default_install_root(&self, env: &Environment) -> PathBuf {
        let claude = env.cwd.join(".claude").join("skills");
        if claude.exists() {
            claude
        } else {
            env.cwd.join(self.relative_install_root())
        }
    }

    fn relative_install_root(&self) -> PathBuf {
        PathBuf::from(".opencode").join("skill")
    }

    fn transform_instruction(&self, content: &str, skill_name: &str) -> String {
        let mut content = common_transforms(content);
        let section = format!(
            "\n\n---\n\n{USAGE_HEADING}\n\n\
             OpenCode discovers this skill from `.opencode/skill/{skill_name}/` and \
             offers it in conversations automatically.\n\n\
             ```bash\n\
             # Run a bundled script by hand\n\
             cd .opencode/skill/{skill_name}/scripts\n\
             python <script_name>.py [arguments]\n\
             ```\n\n\
             See `scripts/README.md` for the available scripts.\n"
        );
        append_section(&mut content, USAGE_HEADING, &section);
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_usage_once() {
        let adapter = OpenCodeAdapter;
        let once = adapter.transform_instruction("# Fmt\n", "fmt");
        assert!(once.contains("## OpenCode CLI Usage"));
        assert!(once.contains("cd .opencode/skill/fmt/scripts"));
        assert_eq!(adapter.transform_instruction(&once, "fmt"), once);
    }
}
