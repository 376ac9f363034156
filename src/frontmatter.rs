//! Metadata header (YAML frontmatter) helpers.
//!
//! The restructuring target needs a description and a glob list out of the
//! original header. Real skills write these in every shape YAML allows and a
//! few it does not (bare `**/*.py` is an alias error to a YAML parser), so
//! extraction works from the raw header text and only leans on `serde_yaml`
//! and `serde_json` where the value is well-formed.

use serde_yaml::Value;

use crate::error::ParseError;

/// Glob used when a header has no usable glob list.
pub const CATCH_ALL_GLOB: &str = "**/*";

/// Description used when neither the header nor a heading provides one.
pub const DEFAULT_DESCRIPTION: &str = "Claude skill";

/// Maximum length of an extracted description (in characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Header keys that may carry globs, in lookup order.
const GLOB_KEYS: [&str; 3] = ["globs", "files", "patterns"];

/// Split content into the raw frontmatter text and the body after it.
///
/// Both delimiters must sit on their own line. The body keeps its leading
/// blank lines.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str), ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if !content.starts_with("---") {
        return Err(ParseError::MissingFrontmatter);
    }

    let mut lines = content.split_inclusive('\n');
    let Some(first_line) = lines.next() else {
        return Err(ParseError::MissingFrontmatter);
    };

    if trim_line_ending(first_line).trim_end() != "---" {
        return Err(ParseError::MissingFrontmatter);
    }

    let mut offset = first_line.len();
    for line in lines {
        if trim_line_ending(line).trim_end() == "---" {
            let frontmatter = &content[first_line.len()..offset];
            let body = &content[offset + line.len()..];
            return Ok((frontmatter, body));
        }
        offset += line.len();
    }

    Err(ParseError::UnclosedFrontmatter)
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Remove the frontmatter block, leaving content without one untouched.
pub fn strip_frontmatter(content: &str) -> &str {
    match split_frontmatter(content) {
        Ok((_, body)) => body,
        Err(_) => content,
    }
}

/// Extract a one-line description for a skill.
///
/// Uses the header's `description` (block scalars included), then the first
/// `# ` heading, then [`DEFAULT_DESCRIPTION`].
pub fn extract_description(content: &str) -> String {
    if let Some(description) = description_field(content) {
        return truncate(&description);
    }

    for line in content.lines() {
        if let Some(heading) = line.strip_prefix("# ") {
            let heading = heading.trim();
            if !heading.is_empty() {
                return truncate(heading);
            }
        }
    }

    DEFAULT_DESCRIPTION.to_string()
}

/// The header's `description`, whitespace-collapsed, if there is one.
pub fn description_field(content: &str) -> Option<String> {
    let (frontmatter, _) = split_frontmatter(content).ok()?;
    header_description(frontmatter)
}

fn header_description(frontmatter: &str) -> Option<String> {
    let from_yaml = match serde_yaml::from_str::<Value>(frontmatter) {
        Ok(Value::Mapping(map)) => match map.get("description") {
            Some(Value::String(text)) => Some(text.clone()),
            _ => None,
        },
        _ => None,
    };

    let raw = from_yaml.or_else(|| {
        raw_value(frontmatter, |key| key == "description")
            .map(|value| unquote(value.trim()).to_string())
    })?;

    let collapsed = collapse_whitespace(&raw);
    (!collapsed.is_empty()).then_some(collapsed)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_DESCRIPTION_LENGTH).collect()
}

/// Extract the glob list from the header.
///
/// Accepts a YAML list, a JSON array (optionally wrapped in quotes) or a
/// comma-separated bare string. Anything else yields [`CATCH_ALL_GLOB`].
pub fn extract_globs(content: &str) -> Vec<String> {
    let Ok((frontmatter, _)) = split_frontmatter(content) else {
        return vec![CATCH_ALL_GLOB.to_string()];
    };

    raw_value(frontmatter, |key| {
        GLOB_KEYS.iter().any(|glob_key| key.eq_ignore_ascii_case(glob_key))
    })
    .and_then(|raw| parse_glob_value(&raw))
    .filter(|globs| !globs.is_empty())
    .unwrap_or_else(|| vec![CATCH_ALL_GLOB.to_string()])
}

/// Render a glob list the way rule headers expect it.
pub fn format_globs(globs: &[String]) -> String {
    if globs.is_empty() {
        CATCH_ALL_GLOB.to_string()
    } else {
        globs.join(", ")
    }
}

/// Parse the raw text of a glob value.
pub fn parse_glob_value(raw: &str) -> Option<Vec<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with('-') {
        let items: Vec<String> = raw
            .lines()
            .filter_map(|line| line.trim().strip_prefix('-'))
            .map(|item| unquote(item.trim()).trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return (!items.is_empty()).then_some(items);
    }

    if raw.starts_with('[') {
        return parse_array(raw);
    }

    let unquoted = unquote(raw).trim();
    if unquoted.starts_with('[') {
        return parse_array(unquoted);
    }

    let items: Vec<String> = unquoted
        .split(',')
        .map(|item| unquote(item.trim()).to_string())
        .filter(|item| !item.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

fn parse_array(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw)
        .ok()
        .or_else(|| serde_yaml::from_str::<Vec<String>>(raw).ok())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Raw text of the first top-level key accepted by `matches_key`.
///
/// An empty inline value (or a block indicator) pulls in the indented or
/// list lines that follow it.
fn raw_value<F>(frontmatter: &str, matches_key: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let mut lines = frontmatter.lines().peekable();

    while let Some(line) = lines.next() {
        if line.starts_with(&[' ', '\t'][..]) {
            continue;
        }
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        if !matches_key(key.trim()) {
            continue;
        }

        let inline = rest.trim();
        if !inline.is_empty() && !matches!(inline, ">" | "|" | ">-" | "|-") {
            return Some(inline.to_string());
        }

        let mut block = Vec::new();
        while let Some(&next) = lines.peek() {
            if next.trim().is_empty() || !next.starts_with(&[' ', '\t', '-'][..]) {
                break;
            }
            block.push(next.trim());
            lines.next();
        }
        return Some(block.join("\n"));
    }

    None
}
