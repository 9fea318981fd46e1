// SPDX-License-Identifier: PMPL-1.0-or-later

//! Line-level edits of a YAML document that leave comments, quoting and key
//! order alone. Anything other than a single-line scalar is left to the
//! caller's full re-serialization.

use serde_yaml::Value;

/// Nothing but blank lines and comments.
pub(super) fn is_blank(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

/// `content` with the scalar at dotted `key` set to `value`, or `None` when
/// the change does not fit on one line.
pub(super) fn edit_scalar(content: &str, key: &str, value: &Value) -> Option<String> {
    let rendered = render_scalar(value)?;
    let parts: Vec<&str> = key.split('.').collect();
    let lines: Vec<&str> = content.lines().collect();
    let mut out: Vec<String> = lines.iter().map(|line| line.to_string()).collect();

    match locate(&lines, &parts) {
        Some(index) => out[index] = replace_value(lines[index], value, &rendered)?,
        None if parts.len() == 1 => out.push(format!("{}: {}", key, rendered)),
        None => return None,
    }

    let mut edited = out.join("\n");
    edited.push('\n');
    Some(edited)
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => None,
        _ => serde_yaml::to_string(value)
            .ok()
            .map(|text| text.trim_end().to_string())
            .filter(|text| !text.contains('\n')),
    }
}

/// Line index of the block-mapping entry for `parts`, walking one
/// indentation level per key.
fn locate(lines: &[&str], parts: &[&str]) -> Option<usize> {
    let mut start = 0;
    let mut parent_indent: Option<usize> = None;
    let mut found = None;

    for part in parts {
        let mut level: Option<usize> = None;
        let mut hit = None;
        for (index, line) in lines.iter().enumerate().skip(start) {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let indent = line.len() - trimmed.len();
            if parent_indent.is_some_and(|parent| indent <= parent) {
                break;
            }
            let entry_indent = *level.get_or_insert(indent);
            if indent == entry_indent && key_of(trimmed).map(|(name, _)| name) == Some(*part) {
                hit = Some((index, indent));
                break;
            }
        }
        let (index, indent) = hit?;
        start = index + 1;
        parent_indent = Some(indent);
        found = Some(index);
    }
    found
}

/// Key name and byte offset of its colon in an indentation-stripped line.
fn key_of(trimmed: &str) -> Option<(&str, usize)> {
    if trimmed == "-" || trimmed.starts_with("- ") {
        return None;
    }
    let (name, colon) = match trimmed.chars().next()? {
        quote @ ('\'' | '"') => {
            let close = trimmed[1..].find(quote)? + 1;
            (&trimmed[1..close], close + 1)
        }
        _ => {
            let colon = trimmed
                .find(": ")
                .or_else(|| trimmed.strip_suffix(':').map(str::len))?;
            (trimmed[..colon].trim_end(), colon)
        }
    };
    trimmed[colon..].starts_with(':').then_some((name, colon))
}

fn replace_value(line: &str, value: &Value, rendered: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    let (_, colon) = key_of(trimmed)?;
    let split = indent + colon + 1;
    let (old, comment) = split_comment(&line[split..]);
    let old = old.trim();
    if old.is_empty() || old.starts_with(['|', '>', '&', '*', '!', '{', '[']) {
        return None;
    }
    Some(format!(
        "{} {}{}",
        &line[..split],
        keep_quote_style(old, value, rendered),
        comment
    ))
}

/// Split a value from its trailing comment; the comment keeps the spacing
/// in front of its `#`.
fn split_comment(rest: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut after_space = true;
    for (index, ch) in rest.char_indices() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None if (ch == '\'' || ch == '"') && rest[..index].trim().is_empty() => {
                quote = Some(ch)
            }
            None if ch == '#' && after_space => {
                let end = rest[..index].trim_end().len();
                return (&rest[..end], &rest[end..]);
            }
            None => {}
        }
        after_space = ch.is_whitespace();
    }
    (rest, "")
}

/// Reuse the old value's quotes when the new string can live inside them.
fn keep_quote_style(old: &str, value: &Value, rendered: &str) -> String {
    if let Value::String(text) = value {
        if rendered == text {
            if old.starts_with('\'') && !text.contains('\'') {
                return format!("'{}'", text);
            }
            if old.starts_with('"') && !text.contains(['"', '\\']) {
                return format!("\"{}\"", text);
            }
        }
    }
    rendered.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_found_per_indentation_level() {
        let lines = ["api:", "  key: a", "  model: b", "model: c"];
        assert_eq!(locate(&lines, &["model"]), Some(3));
        assert_eq!(locate(&lines, &["api", "model"]), Some(2));
        assert_eq!(locate(&lines, &["api", "missing"]), None);
    }

    #[test]
    fn comment_split_respects_quotes() {
        assert_eq!(split_comment(" 'a # b'  # note"), (" 'a # b'", "  # note"));
        assert_eq!(split_comment(" url#frag"), (" url#frag", ""));
    }

    #[test]
    fn block_values_are_not_edited_in_place() {
        let content = "prompt: |\n  hello\n";
        assert!(edit_scalar(content, "prompt", &Value::from("x")).is_none());
    }
}
