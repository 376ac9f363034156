//! Gemini CLI: user-level `~/.gemini/skills/<name>/`.

use std::path::PathBuf;

use super::{Environment, Target, TargetAdapter};
use crate::transform::{append_section, common_transforms};

const USAGE_HEADING: &str = "## Gemini CLI Usage";

#[derive(Debug, Default, Clone, Copy)]
pub struct GeminiAdapter;

impl TargetAdapter for GeminiAdapter {
    fn target(&self) -> Target {
        Target::Gemini
    }

    fn default_install_root(&self, env: &Environment) -> PathBuf {
        env.home().join(self.relative_install_root())
    }

    fn relative_install_root(&self) -> PathBuf {
        PathBuf::from(".gemini").join("skills")
    }

    fn transform_instruction(&self, content: &str, skill_name: &str) -> String {
        let mut content = common_transforms(content);
        let section = format!(
            "\n\n---\n\n{USAGE_HEADING}\n\n\
             Gemini CLI discovers this skill from `~/.gemini/skills/{skill_name}/`; \
             restart `gemini` after installing.\n\n\
             ```bash\n\
             # Run a bundled script by hand\n\
             cd ~/.gemini/skills/{skill_name}/scripts\n\
             python <script_name>.py [arguments]\n\
             ```\n\n\
             ### Shared Skills\n\n\
             The same directory can be shared with Claude Code:\n\n\
             ```bash\n\
             ln -s ~/.gemini/skills/{skill_name} ~/.claude/skills/{skill_name}\n\
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
        let adapter = GeminiAdapter;
        let once = adapter.transform_instruction("# Fmt\n${CLAUDE_PLUGIN_ROOT}/x\n", "fmt");
        assert!(once.starts_with("# Fmt\n./x\n"));
        assert!(once.contains("ln -s ~/.gemini/skills/fmt ~/.claude/skills/fmt"));
        assert_eq!(adapter.transform_instruction(&once, "fmt"), once);
    }
}
