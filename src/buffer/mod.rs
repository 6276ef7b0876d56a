//! Line-oriented chapter buffer.
//!
//! Prose is stored as display lines no wider than the edit area. The reflow
//! engine re-wraps lines as text is inserted or deleted and keeps each
//! paragraph break (a trailing [`PARA_BREAK`]) on the last line of its
//! paragraph. Rows and columns are absolute and 0-based everywhere; only
//! [`ChapterBuffer::top_index`] and [`ChapterBuffer::cursor_display_position`]
//! hand out viewport-relative values.

use std::ops::RangeInclusive;

mod cursor;
mod error;
mod reflow;
mod validate;
mod viewport;

pub use cursor::{CursorMove, Position};
pub use error::{BufferError, BufferResult, ErrorKind};
pub use validate::{errors_in_text, is_character_valid};
pub use viewport::Scroll;

/// Marks the last line of a paragraph. Never typeable: it is one of the
/// reserved chapter file characters.
pub const PARA_BREAK: char = '>';

/// Narrowest edit area the reflow engine accepts.
pub const MIN_COLUMNS: usize = 5;

/// Longest line the chapter file format allows, paragraph marker included.
pub const MAX_LINE_CHARS: usize = 1024;

/// Widest edit area; leaves room for the paragraph marker.
pub const MAX_COLUMNS: usize = MAX_LINE_CHARS - 1;

pub const DEFAULT_MAX_LINES: usize = 10_000;

pub const DEFAULT_TAB_SPACES: &str = "    ";

/// What an operation changed, so a view can decide how much to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    /// Only the cursor moved.
    Cursor,
    /// One line changed; the word count did not.
    Line,
    /// One line changed along with the word count.
    Word,
    /// Several lines changed, lines were added or removed, or the viewport
    /// scrolled: redraw the whole edit area.
    Document,
    CapacityExceeded,
    Rejected,
}

impl Change {
    /// Folds an operation result into a single classification.
    pub fn from_result(result: &BufferResult<Change>) -> Change {
        match result {
            Ok(change) => *change,
            Err(e) if e.kind() == ErrorKind::Capacity => Change::CapacityExceeded,
            Err(_) => Change::Rejected,
        }
    }

    /// True when chapter text was modified.
    pub fn is_edit(self) -> bool {
        matches!(self, Change::Line | Change::Word | Change::Document)
    }
}

/// Whether typed text pushes existing characters right or replaces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    #[default]
    Insert,
    Overwrite,
}

/// Largest on-screen row and column of the edit area, fixed at
/// initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimit {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub struct ChapterBuffer {
    lines: Vec<String>,
    cursor: Position,
    limit: Option<ViewLimit>,
    /// Document row shown on the last viewport row.
    bottom_index: usize,
    word_count: usize,
    tab_spaces: String,
    max_lines: usize,
}

impl Default for ChapterBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChapterBuffer {
    /// Creates an uninitialized buffer. Every edit fails with
    /// [`BufferError::NotInitialized`] until [`initialize`](Self::initialize).
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            cursor: Position::default(),
            limit: None,
            bottom_index: 0,
            word_count: 0,
            tab_spaces: DEFAULT_TAB_SPACES.to_string(),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    /// Fixes the edit area size and leaves the buffer holding one empty line.
    pub fn initialize(&mut self, rows: usize, columns: usize) -> BufferResult<()> {
        if self.limit.is_some() {
            return Err(BufferError::AlreadyInitialized);
        }
        if rows == 0 {
            return Err(BufferError::InvalidParameter(
                "edit area needs at least one row".to_string(),
            ));
        }
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
            return Err(BufferError::InvalidParameter(format!(
                "edit area width {columns} is outside {MIN_COLUMNS}..={MAX_COLUMNS}"
            )));
        }
        self.limit = Some(ViewLimit {
            row: rows - 1,
            col: columns - 1,
        });
        self.lines = vec![String::new()];
        self.cursor = Position::default();
        self.bottom_index = 0;
        self.word_count = 0;
        tracing::debug!(rows, columns, "chapter buffer initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.limit.is_some()
    }

    pub fn view_limit(&self) -> Option<ViewLimit> {
        self.limit
    }

    /// Maximum characters per line, paragraph marker excluded.
    pub fn max_columns(&self) -> Option<usize> {
        self.limit.map(|l| l.col + 1)
    }

    pub fn viewport_rows(&self) -> Option<usize> {
        self.limit.map(|l| l.row + 1)
    }

    fn ready(&self) -> BufferResult<ViewLimit> {
        self.limit.ok_or(BufferError::NotInitialized)
    }

    // ─── Line store queries ──────────────────────────────────────────────

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Raw stored lines, paragraph markers included. This is exactly what
    /// the chapter file persists.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Raw stored line, paragraph marker included.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Visible text of a row, without its paragraph marker.
    pub fn line_text(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| body(l))
    }

    /// Number of visible characters in `row`.
    pub fn character_count_in_row(&self, row: usize) -> Option<usize> {
        self.lines.get(row).map(|l| display_len(l))
    }

    pub fn character_in_row(&self, row: usize, col: usize) -> Option<char> {
        self.line_text(row)
            .and_then(|text| text.as_bytes().get(col))
            .map(|&b| b as char)
    }

    /// True when `row` ends a paragraph.
    pub fn is_paragraph_end(&self, row: usize) -> Option<bool> {
        self.lines.get(row).map(|l| has_marker(l))
    }

    // ─── Word accounting ─────────────────────────────────────────────────

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Recounts every line from scratch, stores and returns the result.
    pub fn refresh_word_count(&mut self) -> usize {
        self.word_count = self.lines.iter().map(|l| count_words(l)).sum();
        self.word_count
    }

    // ─── Configuration ───────────────────────────────────────────────────

    pub fn tab_spaces(&self) -> &str {
        &self.tab_spaces
    }

    /// Sets the text typed in place of a tab: between 1 and 16 spaces.
    pub fn set_tab_spaces(&mut self, spaces: &str) -> BufferResult<()> {
        if spaces.is_empty() || spaces.len() > 16 || spaces.bytes().any(|b| b != b' ') {
            return Err(BufferError::InvalidParameter(format!(
                "tab replacement must be 1 to 16 spaces, got {spaces:?}"
            )));
        }
        self.tab_spaces = spaces.to_string();
        Ok(())
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Sets the line ceiling. It may not drop below the current line count.
    pub fn set_max_lines(&mut self, max_lines: usize) -> BufferResult<()> {
        if max_lines == 0 || max_lines < self.lines.len() {
            return Err(BufferError::InvalidParameter(format!(
                "line limit {max_lines} is below the {} lines already in use",
                self.lines.len().max(1)
            )));
        }
        self.max_lines = max_lines;
        Ok(())
    }

    // ─── Loading ─────────────────────────────────────────────────────────

    /// Replaces the whole chapter with lines read from a chapter file.
    ///
    /// Each line may carry one trailing paragraph marker. Tabs become
    /// [`tab_spaces`](Self::tab_spaces). Paragraphs holding a line wider than
    /// the edit area are re-justified to fit. The cursor returns to the top.
    pub fn load_lines<S: AsRef<str>>(&mut self, source: &[S]) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;

        let mut lines = Vec::with_capacity(source.len().max(1));
        for (idx, raw) in source.iter().enumerate() {
            let raw = raw.as_ref();
            let len = raw.chars().count();
            if len > MAX_LINE_CHARS {
                return Err(BufferError::LineTooLong {
                    line: idx + 1,
                    len,
                    max: MAX_LINE_CHARS,
                });
            }
            let (text, marked) = match raw.strip_suffix(PARA_BREAK) {
                Some(text) => (text, true),
                None => (raw, false),
            };
            if let Some(message) = errors_in_text(text, &format!("line {}", idx + 1)) {
                return Err(BufferError::InvalidText(message));
            }
            let mut line = text.replace('\t', &self.tab_spaces);
            if marked {
                line.push(PARA_BREAK);
            }
            lines.push(line);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }

        let lines = reflow::justify_over_width(lines, width);
        if lines.len() > self.max_lines {
            return Err(BufferError::DocumentFull {
                max: self.max_lines,
            });
        }

        self.lines = lines;
        self.cursor = Position::default();
        self.refresh_word_count();
        self.bottom_index = self.bottom_bounds().0;
        tracing::info!(
            lines = self.lines.len(),
            words = self.word_count,
            "chapter loaded"
        );
        Ok(Change::Document)
    }

    // ─── Paragraph bounds ────────────────────────────────────────────────

    /// First row of the paragraph holding `row`.
    fn paragraph_start(&self, row: usize) -> usize {
        (0..row)
            .rev()
            .find(|&r| has_marker(&self.lines[r]))
            .map_or(0, |r| r + 1)
    }

    /// Last row of the paragraph holding `row`.
    fn paragraph_end(&self, row: usize) -> usize {
        (row..self.lines.len())
            .find(|&r| has_marker(&self.lines[r]))
            .unwrap_or(self.lines.len() - 1)
    }

    // ─── Atomic rewrite ──────────────────────────────────────────────────

    /// Runs `edit` on a copy of `rows`, then splices the copy back in.
    ///
    /// The copy sees the cursor (relative to the first row) when the cursor
    /// lies inside `rows`. Nothing in the buffer changes unless `edit`
    /// succeeds and the result fits within `max_lines`. Afterwards the word
    /// count is adjusted by the difference between old and new rows and the
    /// viewport follows the cursor.
    fn rewrite<F>(&mut self, rows: RangeInclusive<usize>, edit: F) -> BufferResult<Change>
    where
        F: FnOnce(&mut Vec<String>, &mut Option<Position>) -> BufferResult<()>,
    {
        let (start, end) = (*rows.start(), *rows.end());
        let old: Vec<String> = self.lines[start..=end].to_vec();
        let mut work = old.clone();
        let mut cursor = rows
            .contains(&self.cursor.row)
            .then(|| Position::new(self.cursor.row - start, self.cursor.col));

        edit(&mut work, &mut cursor)?;

        if work.is_empty() && self.lines.len() == old.len() {
            work.push(String::new());
        }
        let new_count = self.lines.len() - old.len() + work.len();
        if new_count > self.max_lines {
            return Err(BufferError::DocumentFull {
                max: self.max_lines,
            });
        }

        let changed_rows = if work.len() == old.len() {
            work.iter().zip(&old).filter(|(a, b)| a != b).count()
        } else {
            usize::MAX
        };
        let removed: usize = old.iter().map(|l| count_words(l)).sum();
        let added: usize = work.iter().map(|l| count_words(l)).sum();
        let new_rows = work.len();

        self.lines.splice(start..=end, work);
        let words_before = self.word_count;
        self.word_count = (self.word_count + added).saturating_sub(removed);

        let before = self.cursor;
        self.cursor = match cursor {
            Some(c) => Position::new(start + c.row, c.col),
            None if self.cursor.row > end => {
                Position::new(self.cursor.row - old.len() + new_rows, self.cursor.col)
            }
            None => self.cursor,
        };
        self.clamp_cursor();
        let scrolled = self.follow_cursor();

        if new_rows != old.len() {
            tracing::debug!(
                first_row = start,
                old_rows = old.len(),
                new_rows,
                "reflowed lines"
            );
        }

        Ok(match changed_rows {
            _ if scrolled => Change::Document,
            0 if self.cursor != before => Change::Cursor,
            0 => Change::Unchanged,
            1 if self.word_count != words_before => Change::Word,
            1 => Change::Line,
            _ => Change::Document,
        })
    }

    fn clamp_cursor(&mut self) {
        let last = self.lines.len().saturating_sub(1);
        self.cursor.row = self.cursor.row.min(last);
        let len = self.lines.get(self.cursor.row).map_or(0, |l| display_len(l));
        self.cursor.col = self.cursor.col.min(len);
    }
}

// ─── Line helpers ────────────────────────────────────────────────────────

pub(crate) fn has_marker(line: &str) -> bool {
    line.ends_with(PARA_BREAK)
}

/// The visible part of a line.
pub(crate) fn body(line: &str) -> &str {
    line.strip_suffix(PARA_BREAK).unwrap_or(line)
}

pub(crate) fn display_len(line: &str) -> usize {
    body(line).len()
}

pub(crate) fn count_words(line: &str) -> usize {
    body(line).split_whitespace().count()
}
