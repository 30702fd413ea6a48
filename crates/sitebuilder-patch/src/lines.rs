//! Conversions between file text and line sequences.
//!
//! The empty string is the empty sequence. Any other text is split on
//! `\n`, so a trailing newline shows up as a final empty line and
//! `join_lines(&split_lines(t)) == t` holds for every `t`. Carriage
//! returns are ordinary line content.

/// Split text into lines.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').map(str::to_owned).collect()
    }
}

/// Join lines with a single `\n`.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    out
}

/// Number of lines `split_lines` would produce.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}

/// Render lines prefixed with their 0-based index, the numbering edit
/// operations use.
///
/// ```text
///    0│ <!DOCTYPE html>
///    1│ <html>
/// ```
pub fn numbered<S: AsRef<str>>(lines: &[S]) -> String {
    let width = lines.len().saturating_sub(1).to_string().len().max(4);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}│ {}", i, line.as_ref(), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
