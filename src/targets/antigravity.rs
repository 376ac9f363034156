//! Google Antigravity: workspace `.agent/skills/<name>/`, with templates and
//! docs grouped under `resources/`.

use std::path::PathBuf;

use super::{DirNames, Environment, Target, TargetAdapter};
use crate::transform::{append_section, common_transforms};

const USAGE_HEADING: &str = "## Antigravity";

#[derive(Debug, Default, Clone, Copy)]
pub struct AntigravityAdapter;

impl TargetAdapter for AntigravityAdapter {
    fn target(&self) -> Target {
        Target::Antigravity
    }

    fn default_install_root(&self, env: &Environment) -> PathBuf {
        env.cwd.join(self.relative_install_root())
    }

    fn relative_install_root(&self) -> PathBuf {
        PathBuf::from(".agent").join("skills")
    }

    fn dir_names(&self) -> DirNames {
        DirNames {
            templates: "resources/templates",
            docs: "resources/references",
            ..DirNames::default()
        }
    }

    fn transform_instruction(&self, content: &str, skill_name: &str) -> String {
        let mut content = common_transforms(content);
        let section = format!(
            "\n\n---\n\n{USAGE_HEADING}\n\n\
             This skill is in `.agent/skills/{skill_name}/`. Scripts: `scripts/`, assets: `resources/`.\n"
        );
        append_section(&mut content, USAGE_HEADING, &section);
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_resources_subdirectories() {
        let dir = TempDir::new().expect("temp dir");
        let skill = dir.path().join("ag");
        fs::create_dir_all(skill.join("templates")).expect("mkdir");
        fs::create_dir_all(skill.join("references")).expect("mkdir");
        fs::write(skill.join("SKILL.md"), "# Ag\n").expect("write");
        fs::write(skill.join("templates/t.md"), "t").expect("write");
        fs::write(skill.join("references/r.md"), "r").expect("write");

        let adapter = AntigravityAdapter;
        let out = dir.path().join("out/ag");
        adapter.write(&adapter.transform(&skill), &out).expect("write");

        assert!(out.join("SKILL.md").is_file());
        assert!(out.join("resources/templates/t.md").is_file());
        assert!(out.join("resources/references/r.md").is_file());
        let instruction = fs::read_to_string(out.join("SKILL.md")).expect("read");
        assert_eq!(instruction.matches("## Antigravity").count(), 1);
    }
}
