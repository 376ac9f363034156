//! Skill layout detection.
//!
//! Skill repositories in the wild use three layouts:
//!
//! - Direct: `skill/SKILL.md`, `skill/scripts/`
//! - Nested: `skill/skills/SKILL.md`, `skill/skills/scripts/`
//! - Hooks: `skill/hooks/scripts/` alongside either of the above
//!
//! Detection never fails. Missing directories become `None` and are dealt
//! with by the collector.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::skill::{
    SkillSourceLayout, ASSETS_DIR, DOCS_DIR, HOOKS_DIR, NESTED_SUBDIR, SCRIPTS_DIR, SKILL_MD,
    TEMPLATES_DIR,
};

/// Resolve where a skill keeps its instruction file and content directories.
///
/// Priority: a `skills/` subdirectory holding `SKILL.md` becomes the content
/// root, otherwise the skill directory itself is. Independently, an existing
/// `hooks/scripts/` replaces whichever scripts directory was chosen.
pub fn detect_layout(source_dir: &Path) -> SkillSourceLayout {
    let nested = source_dir.join(NESTED_SUBDIR);
    let uses_nested_subdir = nested.is_dir() && nested.join(SKILL_MD).is_file();
    let content_root = if uses_nested_subdir {
        nested
    } else {
        source_dir.to_path_buf()
    };

    let hooks_scripts = source_dir.join(HOOKS_DIR).join(SCRIPTS_DIR);
    let uses_hooks_scripts = hooks_scripts.is_dir();
    let scripts_dir = if uses_hooks_scripts {
        Some(hooks_scripts)
    } else {
        existing_dir(content_root.join(SCRIPTS_DIR))
    };

    debug!(
        skill = %source_dir.display(),
        nested = uses_nested_subdir,
        hooks = uses_hooks_scripts,
        "detected skill layout"
    );

    SkillSourceLayout {
        root: source_dir.to_path_buf(),
        instruction_file: content_root.join(SKILL_MD),
        scripts_dir,
        templates_dir: existing_dir(content_root.join(TEMPLATES_DIR)),
        docs_dir: existing_dir(content_root.join(DOCS_DIR)),
        assets_dir: existing_dir(content_root.join(ASSETS_DIR)),
        content_root,
        uses_nested_subdir,
        uses_hooks_scripts,
    }
}

/// Whether a directory holds a skill in either the direct or nested layout.
///
/// Mirrors the first two rules of [`detect_layout`].
pub fn has_instruction_file(source_dir: &Path) -> bool {
    source_dir.join(SKILL_MD).is_file() || source_dir.join(NESTED_SUBDIR).join(SKILL_MD).is_file()
}

fn existing_dir(path: PathBuf) -> Option<PathBuf> {
    path.is_dir().then_some(path)
}
