//! Turning generated text into a canonical documentation block

use crate::dialect::Dialect;

/// Format generated text as quoted, indented documentation lines.
///
/// One leading and one trailing recognised marker are stripped from the
/// text, any canonical marker left inside it is removed so it cannot close
/// the block early, and the result is wrapped between canonical marker lines.
/// Every returned line ends with `\n`.
pub fn format_docstring(generated: &str, dialect: &Dialect, indent: usize) -> Vec<String> {
    let body = strip_markers(generated.trim(), dialect);
    let body = body.replace(&dialect.canonical_marker, "");
    let indentation = " ".repeat(indent);
    let marker_line = format!("{}{}\n", indentation, dialect.canonical_marker);

    let mut lines = Vec::with_capacity(body.lines().count() + 2);
    lines.push(marker_line.clone());
    for line in body.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            lines.push("\n".to_string());
        } else {
            lines.push(format!("{}{}\n", indentation, line));
        }
    }
    lines.push(marker_line);
    lines
}

fn strip_markers<'a>(text: &'a str, dialect: &Dialect) -> &'a str {
    let mut text = text;
    if let Some(marker) = dialect.recognized_markers().find(|m| text.starts_with(m)) {
        text = &text[marker.len()..];
    }
    if let Some(marker) = dialect.recognized_markers().find(|m| text.ends_with(m)) {
        text = &text[..text.len() - marker.len()];
    }
    text
}
