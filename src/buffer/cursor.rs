//! Cursor position and bounded cursor motion.

use super::*;

/// A location in the chapter: absolute row, and column within that row's
/// visible text. `col == line length` is the append position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    PreviousCol,
    NextCol,
    PreviousRow,
    NextRow,
    StartOfLine,
    EndOfLine,
    StartOfDocument,
    EndOfDocument,
}

impl ChapterBuffer {
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the cursor one step. Column moves stop at the ends of the row
    /// instead of wrapping; row moves keep the column where the target row is
    /// long enough and clamp it otherwise.
    pub fn move_cursor(&mut self, direction: CursorMove) -> BufferResult<Change> {
        self.ready()?;
        let Position { row, col } = self.cursor;
        let len = display_len(&self.lines[row]);
        let last = self.lines.len() - 1;

        let target = match direction {
            CursorMove::PreviousCol => {
                if col == 0 {
                    return Err(BufferError::BeyondStart);
                }
                Position::new(row, col - 1)
            }
            CursorMove::NextCol => {
                if col >= len {
                    return Err(BufferError::BeyondEnd);
                }
                Position::new(row, col + 1)
            }
            CursorMove::PreviousRow => {
                if row == 0 {
                    return Err(BufferError::BeyondStart);
                }
                Position::new(row - 1, col.min(display_len(&self.lines[row - 1])))
            }
            CursorMove::NextRow => {
                if row >= last {
                    return Err(BufferError::BeyondEnd);
                }
                Position::new(row + 1, col.min(display_len(&self.lines[row + 1])))
            }
            CursorMove::StartOfLine => Position::new(row, 0),
            CursorMove::EndOfLine => Position::new(row, len),
            CursorMove::StartOfDocument => Position::new(0, 0),
            CursorMove::EndOfDocument => Position::new(last, display_len(&self.lines[last])),
        };
        Ok(self.place_cursor(target))
    }

    /// Jumps to `row`, `col`. Both must address an existing position.
    pub fn set_cursor(&mut self, row: usize, col: usize) -> BufferResult<Change> {
        self.ready()?;
        let len = self.character_count_in_row(row).ok_or_else(|| {
            BufferError::InvalidParameter(format!(
                "row {row} is outside 0..{}",
                self.lines.len()
            ))
        })?;
        if col > len {
            return Err(BufferError::InvalidParameter(format!(
                "column {col} is past the end of row {row} ({len} characters)"
            )));
        }
        Ok(self.place_cursor(Position::new(row, col)))
    }

    fn place_cursor(&mut self, target: Position) -> Change {
        if target == self.cursor {
            return Change::Unchanged;
        }
        self.cursor = target;
        if self.follow_cursor() {
            Change::Document
        } else {
            Change::Cursor
        }
    }
}
