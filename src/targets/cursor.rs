//! Cursor rules: `.cursor/rules/<name>/<name>.mdc`.
//!
//! Cursor does not read SKILL.md. The instruction document is rewrapped as
//! an MDC rule (a `description`/`globs`/`alwaysApply` header over the
//! markdown body) and written under the skill's name instead. Supporting
//! files sit directly beside the rule.

use std::path::{Path, PathBuf};

use super::{
    create_dir, transform_skill, write_categories, write_extra_files, DirNames, Environment,
    Target, TargetAdapter,
};
use crate::error::WriteError;
use crate::frontmatter::{extract_description, extract_globs, format_globs, strip_frontmatter};
use crate::skill::{SkillOutput, ASSETS_DIR, REFERENCES_DIR};
use crate::transform::common_transforms;

/// Extension of Cursor rule files.
pub const RULE_EXTENSION: &str = "mdc";

#[derive(Debug, Default, Clone, Copy)]
pub struct CursorAdapter;

impl TargetAdapter for CursorAdapter {
    fn target(&self) -> Target {
        Target::Cursor
    }

    fn default_install_root(&self, env: &Environment) -> PathBuf {
        env.cwd.join(self.relative_install_root())
    }

    fn relative_install_root(&self) -> PathBuf {
        PathBuf::from(".cursor").join("rules")
    }

    fn dir_names(&self) -> DirNames {
        DirNames {
            templates: ASSETS_DIR,
            docs: REFERENCES_DIR,
            ..DirNames::default()
        }
    }

    fn transform_instruction(&self, content: &str, skill_name: &str) -> String {
        let description = extract_description(content);
        let globs = format_globs(&extract_globs(content));
        let transformed = common_transforms(content);
        let body = strip_frontmatter(&transformed).trim_matches(&['\r', '\n'][..]);

        format!(
            "---\n\
             description: {description}\n\
             globs: {globs}\n\
             alwaysApply: false\n\
             ---\n\n\
             {body}\n\n\
             ---\n\n\
             ## Cursor Integration Notes\n\n\
             This rule was converted from an Agent Skill (SKILL.md).\n\n\
             ### Scripts\n\n\
             Supporting scripts live in `scripts/`. Run them by hand after editing files:\n\n\
             ```bash\n\
             cd .cursor/rules/{skill_name}/scripts\n\
             python <script_name>.py [arguments]\n\
             ```\n\n\
             ### References\n\n\
             - Agent Skills standard: [agentskills.io](https://agentskills.io)\n"
        )
    }

    fn transform(&self, source_dir: &Path) -> SkillOutput {
        let mut output = transform_skill(self, source_dir);
        let skill_name = source_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        output.target_specific.insert(
            format!("{skill_name}.{RULE_EXTENSION}"),
            output.instruction.clone(),
        );
        output
    }

    /// The rule file replaces SKILL.md; categories sit beside it.
    fn write(&self, output: &SkillOutput, target_dir: &Path) -> Result<(), WriteError> {
        create_dir(target_dir)?;
        write_extra_files(&output.target_specific, target_dir)?;
        write_categories(output, target_dir, self.dir_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn rewraps_header() {
        let content = "---\nname: fmt\ndescription: Formats code\nglobs:\n  - \"**/*.py\"\n  - \"**/*.ts\"\n---\n\n# Fmt\n\nRun ${CLAUDE_PLUGIN_ROOT}/scripts/fmt.py\n";
        let rule = CursorAdapter.transform_instruction(content, "fmt");
        assert!(rule.starts_with(
            "---\ndescription: Formats code\nglobs: **/*.py, **/*.ts\nalwaysApply: false\n---\n\n# Fmt\n\nRun ./scripts/fmt.py\n\n---\n\n## Cursor Integration Notes"
        ));
        assert!(!rule.contains("name: fmt"));
        assert!(rule.contains("cd .cursor/rules/fmt/scripts"));
    }

    #[test]
    fn headerless_document_gets_heading_description_and_catch_all() {
        let rule = CursorAdapter.transform_instruction("# Review Helper\n\nBody\n", "review");
        assert!(rule.starts_with(
            "---\ndescription: Review Helper\nglobs: **/*\nalwaysApply: false\n---\n\n# Review Helper\n\nBody\n"
        ));
    }

    #[test]
    fn crlf_body_starts_right_after_header() {
        let content = "---\r\ndescription: Formats code\r\n---\r\n\r\n# Fmt\r\nBody\r\n";
        let rule = CursorAdapter.transform_instruction(content, "fmt");
        assert!(
            rule.contains("alwaysApply: false\n---\n\n# Fmt\r\nBody\n\n---"),
            "{rule:?}"
        );
    }

    #[test]
    fn end_to_end_rule_bundle() {
        let dir = TempDir::new().expect("temp dir");
        let skill = dir.path().join("fmt");
        fs::create_dir_all(skill.join("scripts")).expect("mkdir");
        fs::write(
            skill.join("SKILL.md"),
            "---\ndescription: Formats code\nglobs: [\"**/*.py\"]\n---\n# Fmt\n\nFormat Python sources.\n",
        )
        .expect("write");
        fs::write(
            skill.join("scripts/fmt.py"),
            "#!/usr/bin/env python3\n\"\"\"Format Python files in place.\n\nLonger text.\n\"\"\"\n",
        )
        .expect("write");

        let output = CursorAdapter.transform(&skill);
        assert!(output.instruction.starts_with(
            "---\ndescription: Formats code\nglobs: **/*.py\nalwaysApply: false\n---\n\n# Fmt\n\nFormat Python sources.\n"
        ));
        assert_eq!(
            output.target_specific.keys().collect::<Vec<_>>(),
            vec!["fmt.mdc"]
        );
        assert!(output.scripts["README.md"].contains("- `fmt.py` - Format Python files in place."));

        let out = dir.path().join(".cursor/rules/fmt");
        CursorAdapter.write(&output, &out).expect("write");
        assert!(out.join("fmt.mdc").is_file());
        assert!(!out.join("SKILL.md").exists());
        assert!(out.join("scripts/fmt.py").is_file());
        assert!(out.join("scripts/README.md").is_file());
        assert_eq!(
            fs::read_to_string(out.join("fmt.mdc")).expect("read"),
            output.instruction
        );
    }
}
