//! Core skill types and constants.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// File name of the primary instruction document.
pub const SKILL_MD: &str = "SKILL.md";

/// Intermediate subdirectory used by the nested layout.
pub const NESTED_SUBDIR: &str = "skills";

/// Hooks directory whose `scripts/` overrides every other scripts location.
pub const HOOKS_DIR: &str = "hooks";

/// Placeholder for the plugin root in the source environment.
pub const PLUGIN_ROOT_TOKEN: &str = "${CLAUDE_PLUGIN_ROOT}";

/// Extensions collected as scripts (and rewritten for the plugin root token).
pub const SCRIPT_EXTENSIONS: [&str; 8] = ["py", "sh", "bash", "js", "mjs", "ts", "rb", "pl"];

/// Extensions collected alongside scripts as-is.
pub const DATA_EXTENSIONS: [&str; 1] = ["json"];

/// Default output directory names per content category.
pub const SCRIPTS_DIR: &str = "scripts";
pub const TEMPLATES_DIR: &str = "templates";
pub const DOCS_DIR: &str = "docs";
pub const EXAMPLES_DIR: &str = "examples";
pub const ASSETS_DIR: &str = "assets";
pub const REFERENCES_DIR: &str = "references";

/// Relative path (forward-slash separated) to text content.
pub type ContentMap = BTreeMap<String, String>;

/// Resolved on-disk locations for one skill.
///
/// Produced by [`crate::layout::detect_layout`]. Directory fields are `None`
/// when the location does not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSourceLayout {
    /// The skill directory as given by the caller.
    pub root: PathBuf,
    /// Directory the instruction file and category directories resolve under.
    pub content_root: PathBuf,
    /// Path to `SKILL.md`, whether or not it exists.
    pub instruction_file: PathBuf,
    pub scripts_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub docs_dir: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    /// Content lives under `<root>/skills/`.
    pub uses_nested_subdir: bool,
    /// Scripts come from `<root>/hooks/scripts/`.
    pub uses_hooks_scripts: bool,
}

impl SkillSourceLayout {
    /// The nested content root, when the nested layout is in use.
    pub fn nested_root(&self) -> Option<&PathBuf> {
        self.uses_nested_subdir.then_some(&self.content_root)
    }

    /// Name of the skill, taken from the skill directory.
    pub fn skill_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Canonical, target-independent content of one skill after transformation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillOutput {
    /// Transformed instruction document.
    pub instruction: String,
    pub scripts: ContentMap,
    pub templates: ContentMap,
    pub docs: ContentMap,
    pub examples: ContentMap,
    /// Files whose location depends entirely on the target.
    pub target_specific: ContentMap,
}
