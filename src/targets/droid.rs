//! Factory Droid CLI: `.factory/skills/<name>/`.

use std::path::PathBuf;

use super::{Environment, Target, TargetAdapter};
use crate::transform::{append_section, common_transforms};

const USAGE_HEADING: &str = "## Droid CLI Usage";

#[derive(Debug, Default, Clone, Copy)]
pub struct DroidAdapter;

impl TargetAdapter for DroidAdapter {
    fn target(&self) -> Target {
        Target::Droid
    }

    fn default_install_root(&self, env: &Environment) -> PathBuf {
        env.cwd.join(self.relative_install_root())
    }

    fn relative_install_root(&self) -> PathBuf {
        PathBuf::from(".factory").join("skills")
    }

    fn transform_instruction(&self, content: &str, skill_name: &str) -> String {
        let mut content = common_transforms(content);
        let section = format!(
            "\n\n---\n\n{USAGE_HEADING}\n\n\
             Droid (v0.26.0+) discovers this skill from `.factory/skills/{skill_name}/`; \
             manage skills with the `/skills` command.\n\n\
             ```bash\n\
             # Run a bundled script by hand\n\
             cd .factory/skills/{skill_name}/scripts\n\
             python <script_name>.py [arguments]\n\
             ```\n\n\
             ### Enabling Skills\n\n\
             Custom Droids must be enabled, either under `/settings` → Experimental or in \
             `~/.factory/settings.json`:\n\n\
             ```json\n\
             {{\"enableCustomDroids\": true}}\n\
             ```\n\n\
             See `scripts/README.md` for the available scripts.\n"
        );
        append_section(&mut content, USAGE_HEADING, &section);
        content
    }
}
