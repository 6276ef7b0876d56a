//! Reflow engine: splitting over-long lines, filling short ones, and
//! re-justifying paragraphs after edits.
//!
//! A soft line boundary (no paragraph marker) stands for exactly one space.
//! Splitting at a space consumes it and filling puts it back, so a split
//! followed by a fill restores the original text. Splitting mid-word only
//! happens when a single word is wider than the edit area.
//!
//! Every public operation works on a copy of the affected paragraph through
//! [`ChapterBuffer::rewrite`], so a rejected edit leaves the buffer untouched.

use super::*;

impl ChapterBuffer {
    /// Types `text` at the cursor.
    ///
    /// A line that still fits is committed as is. A line that overflows is
    /// split at a word boundary and the rest of its paragraph re-justified.
    pub fn insert_text(&mut self, text: &str, mode: InsertMode) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;
        if let Some(message) = errors_in_text(text, "inserted text") {
            return Err(BufferError::InvalidText(message));
        }
        if text.is_empty() {
            return Ok(Change::Unchanged);
        }
        let text = text.replace('\t', &self.tab_spaces);

        let Position { row, col } = self.cursor;
        let line = &self.lines[row];
        let current = body(line);
        let mut candidate = String::with_capacity(line.len() + text.len());
        candidate.push_str(&current[..col]);
        candidate.push_str(&text);
        match mode {
            InsertMode::Insert => candidate.push_str(&current[col..]),
            InsertMode::Overwrite => {
                if col + text.len() < current.len() {
                    candidate.push_str(&current[col + text.len()..]);
                }
            }
        }
        if has_marker(line) {
            candidate.push(PARA_BREAK);
        }

        // A new space may let the previous line take the first word of this one.
        let first = self.reflow_start(row);
        let needs_reflow =
            display_len(&candidate) > width || (text.contains(' ') && first < row);
        let rows = if needs_reflow {
            first..=self.paragraph_end(row)
        } else {
            row..=row
        };
        let at = row - rows.start();
        let cursor_col = col + text.len();

        self.rewrite(rows, |work, cursor| {
            work[at] = candidate;
            *cursor = Some(Position::new(at, cursor_col));
            if needs_reflow {
                justify(work, cursor, width, 0);
            }
            Ok(())
        })
    }

    /// Deletes the character under the cursor.
    ///
    /// At the end of a line this joins the next line on, removing either the
    /// paragraph break or the space a soft line boundary stands for.
    pub fn delete_character(&mut self) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;
        let Position { row, col } = self.cursor;
        let first = self.reflow_start(row);
        let at = row - first;

        if col >= display_len(&self.lines[row]) {
            if row + 1 >= self.lines.len() {
                if !has_marker(&self.lines[row]) {
                    return Err(BufferError::BeyondEnd);
                }
                return self.rewrite(row..=row, |work, _| {
                    work[0].pop();
                    Ok(())
                });
            }
            let last = self.paragraph_end(row + 1);
            return self.rewrite(first..=last, |work, cursor| {
                join_next(work, cursor, at);
                justify(work, cursor, width, 0);
                Ok(())
            });
        }

        let last = self.paragraph_end(row);
        self.rewrite(first..=last, |work, cursor| {
            work[at].remove(col);
            drop_emptied_line(work, cursor, at, false);
            justify(work, cursor, width, 0);
            Ok(())
        })
    }

    /// Deletes the character before the cursor.
    ///
    /// At column 0 this joins the line onto the previous one, removing either
    /// the previous paragraph break or the soft boundary space.
    pub fn backspace(&mut self) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;
        let Position { row, col } = self.cursor;

        if col == 0 {
            if row == 0 {
                return Err(BufferError::BeyondStart);
            }
            let last = self.paragraph_end(row);
            return self.rewrite(row - 1..=last, |work, cursor| {
                let end = Position::new(0, display_len(&work[0]));
                *cursor = Some(end);
                join_next(work, cursor, 0);
                justify(work, cursor, width, 0);
                Ok(())
            });
        }

        let first = self.reflow_start(row);
        let last = self.paragraph_end(row);
        let at = row - first;
        self.rewrite(first..=last, |work, cursor| {
            work[at].remove(col - 1);
            *cursor = Some(Position::new(at, col - 1));
            drop_emptied_line(work, cursor, at, true);
            justify(work, cursor, width, 0);
            Ok(())
        })
    }

    /// Ends the paragraph at the cursor. Text after the cursor starts a new
    /// paragraph and the cursor moves to its first column.
    pub fn insert_para_break(&mut self) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;
        let Position { row, col } = self.cursor;
        let len = display_len(&self.lines[row]);
        let marked = has_marker(&self.lines[row]);

        // At either side of a soft boundary the break replaces its space.
        if col == 0 && row > 0 && !has_marker(&self.lines[row - 1]) {
            return self.rewrite(row - 1..=row, |work, _| {
                work[0].push(PARA_BREAK);
                Ok(())
            });
        }
        if col == len && !marked && row + 1 < self.lines.len() {
            return self.rewrite(row..=row + 1, |work, cursor| {
                work[0].push(PARA_BREAK);
                *cursor = Some(Position::new(1, 0));
                Ok(())
            });
        }

        let first = self.reflow_start(row);
        let last = self.paragraph_end(row);
        let at = row - first;
        self.rewrite(first..=last, |work, cursor| {
            let line = std::mem::take(&mut work[at]);
            let text = body(&line);
            let mut head = text[..col].to_string();
            head.push(PARA_BREAK);
            let mut tail = text[col..].to_string();
            if marked {
                tail.push(PARA_BREAK);
            }
            work[at] = head;
            work.insert(at + 1, tail);
            *cursor = Some(Position::new(at + 1, 0));
            justify(work, cursor, width, 0);
            Ok(())
        })
    }

    /// Splits `row` so that no fragment holds more than `max_col_index`
    /// characters, cascading through the tail until every fragment fits.
    pub fn split_long_line(&mut self, row: usize, max_col_index: usize) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;
        self.check_row(row)?;
        if !(1..=width).contains(&max_col_index) {
            return Err(BufferError::InvalidParameter(format!(
                "split column {max_col_index} is outside 1..={width}"
            )));
        }
        self.rewrite(row..=row, |work, cursor| {
            let mut at = 0;
            while display_len(&work[at]) > max_col_index {
                split_line(work, cursor, at, max_col_index);
                at += 1;
            }
            Ok(())
        })
    }

    /// Pulls the whole next line onto `row` when `row` does not end a
    /// paragraph and the joined text fits in `max_col_index` characters.
    ///
    /// Returns [`Change::Document`] when the next line was absorbed and
    /// removed, [`Change::Unchanged`] when nothing could be pulled.
    pub fn fill_short_line(&mut self, row: usize, max_col_index: usize) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;
        self.check_row(row)?;
        if !(1..=width).contains(&max_col_index) {
            return Err(BufferError::InvalidParameter(format!(
                "fill column {max_col_index} is outside 1..={width}"
            )));
        }
        if row + 1 >= self.lines.len() || has_marker(&self.lines[row]) {
            return Ok(Change::Unchanged);
        }
        if joined_len(&self.lines[row], &self.lines[row + 1]) > max_col_index {
            return Ok(Change::Unchanged);
        }
        self.rewrite(row..=row + 1, |work, cursor| {
            merge_next(work, cursor, 0);
            Ok(())
        })?;
        Ok(Change::Document)
    }

    /// Packs every line of the paragraph holding `start_row` as full as the
    /// edit area allows.
    pub fn left_justify_lines_in_paragraph(&mut self, start_row: usize) -> BufferResult<Change> {
        let width = self.ready()?.col + 1;
        self.check_row(start_row)?;
        let first = self.paragraph_start(start_row);
        let last = self.paragraph_end(start_row);
        self.rewrite(first..=last, |work, cursor| {
            justify(work, cursor, width, 0);
            Ok(())
        })
    }

    fn check_row(&self, row: usize) -> BufferResult<()> {
        if row >= self.lines.len() {
            return Err(BufferError::InvalidParameter(format!(
                "row {row} is outside 0..{}",
                self.lines.len()
            )));
        }
        Ok(())
    }

    /// First row an edit on `row` can reflow: the row above is included so
    /// that it can take back words when `row` shrinks.
    fn reflow_start(&self, row: usize) -> usize {
        row.saturating_sub(1)
    }
}

/// Where to split `text` so the head holds at most `max` characters.
///
/// Returns `(head_end, tail_start)`. Splits at the last space at or before
/// `max` (the space itself is dropped), even a leading one that leaves the
/// head empty; without one, splits mid-word at `max`.
pub(crate) fn split_index_from_start(text: &str, max: usize) -> (usize, usize) {
    let bytes = text.as_bytes();
    if bytes.len() <= max {
        return (bytes.len(), bytes.len());
    }
    match bytes[..=max].iter().rposition(|&b| b == b' ') {
        Some(space) => (space, space + 1),
        None => (max, max),
    }
}

/// Splits line `at` once, inserting the tail as line `at + 1`. The tail keeps
/// any paragraph marker.
fn split_line(lines: &mut Vec<String>, cursor: &mut Option<Position>, at: usize, max: usize) {
    let line = std::mem::take(&mut lines[at]);
    let marked = has_marker(&line);
    let text = body(&line);
    let (head_end, tail_start) = split_index_from_start(text, max);

    let mut tail = text[tail_start..].to_string();
    if marked {
        tail.push(PARA_BREAK);
    }
    lines[at] = text[..head_end].to_string();
    lines.insert(at + 1, tail);

    if let Some(c) = cursor {
        if c.row == at && c.col > head_end {
            *c = Position::new(at + 1, c.col.saturating_sub(tail_start));
        } else if c.row > at {
            c.row += 1;
        }
    }
}

/// Length of `first` and `second` joined across a soft boundary.
fn joined_len(first: &str, second: &str) -> usize {
    let (a, b) = (display_len(first), display_len(second));
    a + b + usize::from(a > 0 || b > 0)
}

/// Appends line `at + 1` to line `at` with the soft boundary space between
/// them. Line `at` must not end a paragraph.
fn merge_next(lines: &mut Vec<String>, cursor: &mut Option<Position>, at: usize) {
    let next = lines.remove(at + 1);
    let head_len = lines[at].len();
    let gap = usize::from(head_len > 0 || display_len(&next) > 0);
    if gap == 1 {
        lines[at].push(' ');
    }
    lines[at].push_str(&next);
    shift_cursor_up(cursor, at, head_len + gap);
}

/// Appends line `at + 1` to line `at` with nothing between them, dropping
/// any paragraph marker on line `at`.
fn join_next(lines: &mut Vec<String>, cursor: &mut Option<Position>, at: usize) {
    let next = lines.remove(at + 1);
    if has_marker(&lines[at]) {
        lines[at].pop();
    }
    let head_len = lines[at].len();
    lines[at].push_str(&next);
    shift_cursor_up(cursor, at, head_len);
}

/// Cursor bookkeeping after line `at + 1` was appended to line `at` at
/// column `offset`.
fn shift_cursor_up(cursor: &mut Option<Position>, at: usize, offset: usize) {
    if let Some(c) = cursor {
        if c.row == at + 1 {
            *c = Position::new(at, c.col + offset);
        } else if c.row > at + 1 {
            c.row -= 1;
        }
    }
}

/// Removes line `at` if deleting left it with no text and no marker, unless it
/// is the only line. The cursor goes to the end of the line above when
/// `backward` (or when nothing follows), otherwise to the start of the line
/// that moved up.
fn drop_emptied_line(lines: &mut Vec<String>, cursor: &mut Option<Position>, at: usize, backward: bool) {
    if !lines[at].is_empty() || lines.len() == 1 {
        return;
    }
    lines.remove(at);
    *cursor = Some(if at > 0 && (backward || at == lines.len()) {
        Position::new(at - 1, display_len(&lines[at - 1]))
    } else {
        Position::new(at, 0)
    });
}

/// Packs lines from `from` onwards so each holds as many words as fit in
/// `width`. Never merges across a paragraph marker. A line with room keeps
/// taking the next line until it overflows, then gives back what does not fit.
pub(crate) fn justify(lines: &mut Vec<String>, cursor: &mut Option<Position>, width: usize, from: usize) {
    let mut at = from;
    while at < lines.len() {
        loop {
            if display_len(&lines[at]) > width {
                split_line(lines, cursor, at, width);
                break;
            }
            if has_marker(&lines[at]) || at + 1 >= lines.len() {
                break;
            }
            merge_next(lines, cursor, at);
        }
        at += 1;
    }
}

/// Re-justifies every paragraph that holds a line wider than `width`,
/// leaving other paragraphs exactly as they are.
pub(crate) fn justify_over_width(lines: Vec<String>, width: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut paragraph = Vec::new();
    let total = lines.len();
    for (idx, line) in lines.into_iter().enumerate() {
        let ends = has_marker(&line) || idx + 1 == total;
        paragraph.push(line);
        if ends {
            if paragraph.iter().any(|l| display_len(l) > width) {
                justify(&mut paragraph, &mut None, width, 0);
            }
            out.append(&mut paragraph);
        }
    }
    out
}
