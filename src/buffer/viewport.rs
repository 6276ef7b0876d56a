//! Scroll arithmetic over the edit area.
//!
//! The only viewport state is `bottom_index`, the document row shown on the
//! last visible line. It always lies in
//! `min(line_count - 1, rows - 1)..=line_count - 1`.

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    Top,
    Bottom,
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    /// Scroll just far enough to show the cursor row.
    ToCursor,
}

impl ChapterBuffer {
    pub fn bottom_index(&self) -> usize {
        self.bottom_index
    }

    /// Document row shown on the first visible line.
    pub fn top_index(&self) -> usize {
        let rows = self.viewport_rows().unwrap_or(1);
        (self.bottom_index + 1).saturating_sub(rows)
    }

    /// Moves the viewport. Paging past either end stops at the end rather
    /// than failing. Returns whether the viewport actually moved.
    pub fn scroll(&mut self, scroll: Scroll) -> BufferResult<bool> {
        self.ready()?;
        let before = self.bottom_index;
        self.bottom_index = self.bottom_for(scroll);
        let moved = self.bottom_index != before;
        if moved {
            tracing::debug!(?scroll, from = before, to = self.bottom_index, "scrolled");
        }
        Ok(moved)
    }

    /// Exactly `count` rows of visible text starting at the top of the
    /// viewport, padded with blank rows past the end of the chapter.
    pub fn lines_for_display(&self, count: usize) -> BufferResult<Vec<String>> {
        let rows = self.ready()?.row + 1;
        if count > rows {
            return Err(BufferError::InvalidParameter(format!(
                "cannot display {count} rows in a {rows}-row edit area"
            )));
        }
        let top = self.top_index();
        Ok((top..top + count)
            .map(|row| self.line_text(row).unwrap_or_default().to_string())
            .collect())
    }

    /// Cursor position relative to the top-left of the viewport, or `None`
    /// when the cursor row is scrolled out of view.
    pub fn cursor_display_position(&self) -> Option<(usize, usize)> {
        self.limit?;
        let top = self.top_index();
        (top..=self.bottom_index)
            .contains(&self.cursor.row)
            .then(|| (self.cursor.row - top, self.cursor.col))
    }

    /// Lowest and highest legal `bottom_index` for the current line count.
    pub(super) fn bottom_bounds(&self) -> (usize, usize) {
        let rows = self.viewport_rows().unwrap_or(1);
        let last = self.lines.len().saturating_sub(1);
        (last.min(rows - 1), last)
    }

    /// Re-clamps the viewport after the line count changed and scrolls the
    /// cursor into view. Returns whether the viewport moved.
    pub(super) fn follow_cursor(&mut self) -> bool {
        let before = self.bottom_index;
        self.bottom_index = self.bottom_for(Scroll::ToCursor);
        self.bottom_index != before
    }

    fn bottom_for(&self, scroll: Scroll) -> usize {
        let rows = self.viewport_rows().unwrap_or(1);
        let (lo, hi) = self.bottom_bounds();
        let bottom = self.bottom_index.clamp(lo, hi);
        let target = match scroll {
            Scroll::Top => lo,
            Scroll::Bottom => hi,
            Scroll::LineUp => bottom.saturating_sub(1),
            Scroll::LineDown => bottom + 1,
            Scroll::PageUp => bottom.saturating_sub(rows),
            Scroll::PageDown => bottom + rows,
            Scroll::ToCursor => {
                let row = self.cursor.row;
                let top = (bottom + 1).saturating_sub(rows);
                if row > bottom {
                    row
                } else if row < top {
                    row + rows - 1
                } else {
                    bottom
                }
            }
        };
        target.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five-row viewport over lines "0" to "10".
    fn eleven_lines() -> ChapterBuffer {
        let mut buffer = ChapterBuffer::new();
        buffer.initialize(5, 20).unwrap();
        let lines: Vec<String> = (0..=10).map(|n| format!("{n}>")).collect();
        buffer.load_lines(&lines).unwrap();
        buffer
    }

    #[test]
    fn top_and_bottom() {
        let mut buffer = eleven_lines();
        assert_eq!(buffer.bottom_index(), 4);
        assert_eq!(buffer.scroll(Scroll::Bottom), Ok(true));
        assert_eq!(buffer.bottom_index(), 10);
        assert_eq!(buffer.top_index(), 6);
        assert_eq!(buffer.scroll(Scroll::Bottom), Ok(false));
        assert_eq!(buffer.scroll(Scroll::Top), Ok(true));
        assert_eq!(buffer.bottom_index(), 4);
    }

    #[test]
    fn line_up_at_top_does_nothing() {
        let mut buffer = eleven_lines();
        assert_eq!(buffer.scroll(Scroll::LineUp), Ok(false));
        assert_eq!(buffer.bottom_index(), 4);
    }

    #[test]
    fn line_moves_step_by_one() {
        let mut buffer = eleven_lines();
        assert_eq!(buffer.scroll(Scroll::LineDown), Ok(true));
        assert_eq!(buffer.bottom_index(), 5);
        assert_eq!(buffer.scroll(Scroll::LineUp), Ok(true));
        assert_eq!(buffer.bottom_index(), 4);
    }

    #[test]
    fn page_moves_stop_at_the_edges() {
        let mut buffer = eleven_lines();
        buffer.scroll(Scroll::LineDown).unwrap();
        buffer.scroll(Scroll::LineDown).unwrap();
        buffer.scroll(Scroll::LineDown).unwrap();
        assert_eq!(buffer.bottom_index(), 7);
        assert_eq!(buffer.scroll(Scroll::PageDown), Ok(true));
        assert_eq!(buffer.bottom_index(), 10);
        assert_eq!(buffer.scroll(Scroll::PageDown), Ok(false));
        assert_eq!(buffer.scroll(Scroll::PageUp), Ok(true));
        assert_eq!(buffer.bottom_index(), 5);
        assert_eq!(buffer.scroll(Scroll::PageUp), Ok(true));
        assert_eq!(buffer.bottom_index(), 4);
    }

    #[test]
    fn to_cursor_scrolls_minimally() {
        let mut buffer = eleven_lines();
        buffer.cursor = Position::new(8, 0);
        assert_eq!(buffer.scroll(Scroll::ToCursor), Ok(true));
        assert_eq!(buffer.bottom_index(), 8);

        buffer.cursor = Position::new(5, 0);
        assert_eq!(buffer.scroll(Scroll::ToCursor), Ok(false));

        buffer.cursor = Position::new(2, 0);
        assert_eq!(buffer.scroll(Scroll::ToCursor), Ok(true));
        assert_eq!(buffer.top_index(), 2);
        assert_eq!(buffer.bottom_index(), 6);
    }

    #[test]
    fn short_document_pins_bottom_to_last_line() {
        let mut buffer = ChapterBuffer::new();
        buffer.initialize(5, 20).unwrap();
        buffer.load_lines(&["a>", "b>"]).unwrap();
        assert_eq!(buffer.bottom_index(), 1);
        for scroll in [Scroll::PageDown, Scroll::LineDown, Scroll::Bottom, Scroll::PageUp] {
            assert_eq!(buffer.scroll(scroll), Ok(false));
            assert_eq!(buffer.bottom_index(), 1);
        }
    }

    #[test]
    fn display_rows_are_padded() {
        let mut buffer = ChapterBuffer::new();
        buffer.initialize(4, 20).unwrap();
        buffer.load_lines(&["first", "second>"]).unwrap();
        assert_eq!(
            buffer.lines_for_display(4).unwrap(),
            vec!["first", "second", "", ""]
        );
        assert_eq!(buffer.lines_for_display(0).unwrap(), Vec::<String>::new());
        assert!(matches!(
            buffer.lines_for_display(5),
            Err(BufferError::InvalidParameter(_))
        ));
    }

    #[test]
    fn display_window_follows_scroll() {
        let mut buffer = eleven_lines();
        buffer.scroll(Scroll::Bottom).unwrap();
        assert_eq!(
            buffer.lines_for_display(5).unwrap(),
            vec!["6", "7", "8", "9", "10"]
        );
    }

    #[test]
    fn cursor_display_position_is_viewport_relative() {
        let mut buffer = eleven_lines();
        buffer.set_cursor(9, 1).unwrap();
        assert_eq!(buffer.bottom_index(), 9);
        assert_eq!(buffer.cursor_display_position(), Some((4, 1)));
        buffer.scroll(Scroll::Top).unwrap();
        assert_eq!(buffer.cursor_display_position(), None);
    }
}
