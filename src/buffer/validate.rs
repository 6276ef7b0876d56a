//! Character and text validation for buffer input and chapter file lines.

use super::MAX_LINE_CHARS;

/// Characters reserved for chapter file tags.
const RESERVED: [char; 2] = ['<', '>'];

/// Returns true for characters the buffer can hold: space, tab and printable
/// ASCII. Control characters (NUL included) and non-ASCII are refused since
/// every character must occupy exactly one column.
pub fn is_character_valid(c: char) -> bool {
    c == ' ' || c == '\t' || c.is_ascii_graphic()
}

/// Checks `text` for anything that may not appear inside a single line.
///
/// Returns `None` when the text is acceptable, otherwise a message naming
/// `line_label` and the 1-based column of the first problem.
pub fn errors_in_text(text: &str, line_label: &str) -> Option<String> {
    let len = text.chars().count();
    if len > MAX_LINE_CHARS {
        return Some(format!(
            "{line_label} is too long: {len} characters, column {} is past the limit of {MAX_LINE_CHARS}",
            MAX_LINE_CHARS + 1
        ));
    }

    for (idx, c) in text.chars().enumerate() {
        let column = idx + 1;
        if c == '\n' || c == '\r' {
            return Some(format!("{line_label} has a line break at column {column}"));
        }
        if RESERVED.contains(&c) {
            return Some(format!(
                "{line_label} has reserved character '{c}' at column {column}"
            ));
        }
        if !is_character_valid(c) {
            return Some(format!(
                "{line_label} has invalid character U+{:04X} at column {column}",
                c as u32
            ));
        }
    }
    None
}
