//! Content collection for each skill category.
//!
//! Every category is gathered into a [`ContentMap`] keyed by forward-slash
//! relative paths. Reads are best-effort: a file that cannot be read or is
//! not UTF-8 text is left out of its category and never fails the skill.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::skill::{
    ContentMap, SkillOutput, SkillSourceLayout, ASSETS_DIR, DATA_EXTENSIONS, DOCS_DIR,
    EXAMPLES_DIR, PLUGIN_ROOT_TOKEN, REFERENCES_DIR, SCRIPT_EXTENSIONS, TEMPLATES_DIR,
};

/// Summary used when a script has no leading documentation block.
pub const DEFAULT_SCRIPT_SUMMARY: &str = "Automation script";

static DOCSTRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""""([^"]+)""""#).expect("valid docstring pattern"));

/// Outcome of reading one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRead {
    Text(String),
    Skipped(SkipReason),
}

/// Why a file was left out of its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotText,
    Io(io::ErrorKind),
}

impl FileRead {
    /// Read a file as UTF-8 text.
    pub fn from_path(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(bytes),
            Err(err) => Self::Skipped(SkipReason::Io(err.kind())),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(_) => Self::Skipped(SkipReason::NotText),
        }
    }
}

/// Fold per-file reads into a category mapping, dropping skipped files.
///
/// Later entries overwrite earlier ones with the same key.
pub fn aggregate<I>(reads: I) -> ContentMap
where
    I: IntoIterator<Item = (String, FileRead)>,
{
    let mut map = ContentMap::new();
    for (key, read) in reads {
        match read {
            FileRead::Text(text) => {
                map.insert(key, text);
            }
            FileRead::Skipped(reason) => debug!(file = %key, ?reason, "skipping unreadable file"),
        }
    }
    map
}

/// Recursively read every file under `dir` accepted by `filter`.
///
/// Returns an empty map when `dir` does not exist.
pub fn collect_matching<F>(dir: &Path, filter: F) -> ContentMap
where
    F: Fn(&str) -> bool,
{
    if !dir.is_dir() {
        return ContentMap::new();
    }

    let reads = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let key = relative_key(dir, entry.path())?;
            filter(&key).then(|| (key, FileRead::from_path(entry.path())))
        });

    aggregate(reads)
}

/// Recursively read every file under `dir`.
pub fn collect_dir(dir: &Path) -> ContentMap {
    collect_matching(dir, |_| true)
}

/// Forward-slash path of `path` relative to `base`.
pub fn relative_key(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|component| component.as_os_str().to_string_lossy().to_string())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn extension(key: &str) -> Option<&str> {
    let file_name = key.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    (!stem.is_empty()).then_some(ext)
}

/// Whether a file name has a recognized script extension.
pub fn is_script(key: &str) -> bool {
    extension(key).is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

fn is_data(key: &str) -> bool {
    extension(key).is_some_and(|ext| DATA_EXTENSIONS.contains(&ext))
}

/// Scripts from the single winning scripts location, plus JSON data files.
pub fn collect_scripts(layout: &SkillSourceLayout) -> ContentMap {
    let Some(dir) = &layout.scripts_dir else {
        return ContentMap::new();
    };

    let mut scripts: ContentMap = collect_matching(dir, is_script)
        .into_iter()
        .map(|(key, content)| (key, content.replace(PLUGIN_ROOT_TOKEN, ".")))
        .collect();
    scripts.extend(collect_matching(dir, is_data));
    scripts
}

/// Files of an assets directory: its `templates/` subfolder merged with
/// everything else in it.
fn collect_assets(assets: &Path) -> ContentMap {
    let mut files = collect_dir(&assets.join(TEMPLATES_DIR));
    let prefix = format!("{TEMPLATES_DIR}/");
    files.extend(collect_matching(assets, |key| !key.starts_with(&prefix)));
    files
}

/// Templates and assets.
///
/// The resolved assets and templates directories always contribute. The
/// root-level `assets/` is consulted only when both produced nothing.
pub fn collect_templates(layout: &SkillSourceLayout) -> ContentMap {
    let mut templates = ContentMap::new();

    if let Some(assets) = &layout.assets_dir {
        templates.extend(collect_assets(assets));
    }
    if let Some(dir) = &layout.templates_dir {
        templates.extend(collect_dir(dir));
    }

    if templates.is_empty() {
        templates.extend(collect_assets(&layout.root.join(ASSETS_DIR)));
    }

    templates
}

/// Union of every docs and references location.
pub fn collect_docs(layout: &SkillSourceLayout) -> ContentMap {
    let mut docs = collect_dir(&layout.root.join(REFERENCES_DIR));
    if let Some(dir) = &layout.docs_dir {
        docs.extend(collect_dir(dir));
    }
    if let Some(nested) = layout.nested_root() {
        docs.extend(collect_dir(&nested.join(REFERENCES_DIR)));
        docs.extend(collect_dir(&nested.join(DOCS_DIR)));
    }
    docs
}

/// Union of the root and nested `examples/` directories.
pub fn collect_examples(layout: &SkillSourceLayout) -> ContentMap {
    let mut examples = collect_dir(&layout.root.join(EXAMPLES_DIR));
    if let Some(nested) = layout.nested_root() {
        examples.extend(collect_dir(&nested.join(EXAMPLES_DIR)));
    }
    examples
}

/// First line of a script's leading documentation block.
///
/// Recognizes a triple-quoted docstring, then a leading run of `#` or `//`
/// comments after an optional shebang.
pub fn script_summary(content: &str) -> Option<String> {
    if let Some(captures) = DOCSTRING.captures(content) {
        if let Some(first) = captures[1].trim().lines().next() {
            return Some(first.trim().to_string());
        }
    }

    let mut lines = content.lines().peekable();
    if lines.peek().is_some_and(|line| line.starts_with("#!")) {
        lines.next();
    }

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let text = if let Some(rest) = line.strip_prefix("//") {
            rest
        } else if let Some(rest) = line.strip_prefix('#') {
            rest
        } else {
            return None;
        };
        let text = text.trim_start_matches(&['#', '/', '!'][..]).trim();
        if text.is_empty() || text.starts_with("-*-") {
            continue;
        }
        return Some(text.to_string());
    }

    None
}

/// Generate `scripts/README.md` for the scripts of a skill.
///
/// Lists the top-level script files of the winning scripts location.
pub fn scripts_readme(layout: &SkillSourceLayout) -> String {
    let skill_name = layout.skill_name();
    let mut readme = format!(
        "# {skill_name} Scripts\n\n\
         These scripts support the {skill_name} skill. Some assistants run them \
         automatically through hooks; everywhere else, run them by hand.\n\n\
         ## Usage\n\n\
         ```bash\n\
         # From the installed skill directory\n\
         python scripts/<script_name>.py [arguments]\n\
         ```\n\n\
         ## Available Scripts\n\n"
    );

    let mut listed = Vec::new();
    if let Some(dir) = &layout.scripts_dir {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.filter_map(Result::ok) {
                let name = entry.file_name().to_string_lossy().to_string();
                if entry.path().is_file() && is_script(&name) {
                    listed.push((name, entry.path()));
                }
            }
        }
    }
    listed.sort();

    if listed.is_empty() {
        readme.push_str("(No scripts found)\n");
    }
    for (name, path) in listed {
        let summary = match FileRead::from_path(&path) {
            FileRead::Text(content) => script_summary(&content),
            FileRead::Skipped(_) => None,
        };
        let summary = summary.unwrap_or_else(|| DEFAULT_SCRIPT_SUMMARY.to_string());
        readme.push_str(&format!("- `{name}` - {summary}\n"));
    }

    readme.push_str(
        "\n## Requirements\n\n\
         - An interpreter for each script's language (Python 3.8+ for `.py`)\n\
         - Script-specific dependencies (check each script's imports)\n",
    );
    readme
}

/// Collect every content category of a skill.
///
/// The instruction document is left empty; adapters fill it in.
pub fn collect_content(layout: &SkillSourceLayout) -> SkillOutput {
    let mut scripts = collect_scripts(layout);
    scripts.insert("README.md".to_string(), scripts_readme(layout));

    SkillOutput {
        instruction: String::new(),
        scripts,
        templates: collect_templates(layout),
        docs: collect_docs(layout),
        examples: collect_examples(layout),
        target_specific: ContentMap::new(),
    }
}
