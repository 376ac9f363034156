//! Instruction document rewriting shared by every target.

use std::fs;
use std::io;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::skill::{SkillSourceLayout, PLUGIN_ROOT_TOKEN};

static SKILL_INVOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Skill\(skill="([^"]+)"(?:,\s*args="([^"]*)")?\)"#)
        .expect("valid invocation pattern")
});

/// Strip the plugin root placeholder and rewrite `Skill(...)` invocations.
///
/// `Skill(skill="lint", args="--fix")` becomes `@lint --fix`. Applying this
/// twice gives the same text as applying it once.
pub fn common_transforms(content: &str) -> String {
    let content = content.replace(PLUGIN_ROOT_TOKEN, ".");
    SKILL_INVOCATION
        .replace_all(&content, |caps: &regex::Captures<'_>| {
            let args = caps.get(2).map_or("", |m| m.as_str());
            format!("@{} {}", &caps[1], args)
        })
        .into_owned()
}

/// Append `section` unless a line already carries its heading.
pub fn append_section(content: &mut String, heading: &str, section: &str) {
    if content.lines().any(|line| line.trim_end() == heading) {
        return;
    }
    content.push_str(section);
}

/// Rewrite references to the default category directories.
///
/// `templates/` and `docs/` become the target's directory names, both as
/// path prefixes and as backticked names.
pub fn rename_dir_references(content: &str, templates: &str, docs: &str) -> String {
    let mut content = content.to_string();
    for (from, to) in [("templates", templates), ("docs", docs)] {
        if from == to {
            continue;
        }
        content = content
            .replace(&format!("{from}/"), &format!("{to}/"))
            .replace(&format!("`{from}`"), &format!("`{to}`"));
    }
    content
}

/// Read the instruction document.
///
/// A missing or unreadable file yields `Err` carrying the placeholder
/// document to install instead; the skill is never aborted over it.
pub fn read_instruction(layout: &SkillSourceLayout) -> Result<String, String> {
    let skill_name = layout.skill_name();
    match fs::read_to_string(&layout.instruction_file) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(format!("# {skill_name}\n\nNo SKILL.md found in source."))
        }
        Err(err) => {
            warn!(file = %layout.instruction_file.display(), error = %err, "unreadable SKILL.md");
            Err(format!("# {skill_name}\n\nError reading SKILL.md: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::detect_layout;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn rewrites_invocations() {
        assert_eq!(
            common_transforms(r#"Run Skill(skill="lint", args="--fix") now"#),
            "Run @lint --fix now"
        );
        assert_eq!(common_transforms(r#"Skill(skill="fmt")"#), "@fmt ");
        assert_eq!(
            common_transforms(r#"Skill(skill="a",args="x") and Skill(skill="b")"#),
            "@a x and @b "
        );
    }

    #[test]
    fn replaces_plugin_root() {
        assert_eq!(
            common_transforms("python ${CLAUDE_PLUGIN_ROOT}/scripts/run.py"),
            "python ./scripts/run.py"
        );
    }

    #[test]
    fn append_section_is_idempotent() {
        let mut content = "# Skill\n".to_string();
        let section = "\n\n---\n\n## Usage\n\nRun it.\n";
        append_section(&mut content, "## Usage", section);
        let once = content.clone();
        append_section(&mut content, "## Usage", section);
        assert_eq!(content, once);
        assert!(content.ends_with("Run it.\n"));
    }

    #[test]
    fn rename_dir_references_only_when_different() {
        let text = "See templates/a.md and docs/b.md in `templates` and `docs`.";
        assert_eq!(
            rename_dir_references(text, "assets", "references"),
            "See assets/a.md and references/b.md in `assets` and `references`."
        );
        assert_eq!(rename_dir_references(text, "templates", "docs"), text);
    }

    #[test]
    fn read_instruction_placeholders() {
        let dir = TempDir::new().expect("temp dir");
        let skill = dir.path().join("ghost");
        fs::create_dir_all(&skill).expect("mkdir");
        let err = read_instruction(&detect_layout(&skill)).unwrap_err();
        assert_eq!(err, "# ghost\n\nNo SKILL.md found in source.");

        fs::write(skill.join("SKILL.md"), [0xff_u8, 0xfe]).expect("write");
        let err = read_instruction(&detect_layout(&skill)).unwrap_err();
        assert!(err.starts_with("# ghost\n\nError reading SKILL.md:"));
    }

    proptest! {
        #[test]
        fn prop_common_transforms_idempotent(
            prefix in "[a-zA-Z #\n]{0,20}",
            name in "[a-z-]{1,10}",
            args in proptest::option::of("[a-z -]{0,10}"),
        ) {
            let directive = match &args {
                Some(args) => format!(r#"Skill(skill="{name}", args="{args}")"#),
                None => format!(r#"Skill(skill="{name}")"#),
            };
            let text = format!("{prefix}${{CLAUDE_PLUGIN_ROOT}} {directive}");
            let once = common_transforms(&text);
            prop_assert_eq!(common_transforms(&once), once.clone());
            let expected = format!("@{} {}", name, args.unwrap_or_default());
            prop_assert!(once.contains(&expected));
        }
    }
}
