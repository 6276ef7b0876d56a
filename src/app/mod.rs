use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::buffer::{
    BufferError, BufferResult, Change, ChapterBuffer, CursorMove, InsertMode, Scroll,
};
use crate::chapter_file;
use crate::components::{editor, header, status};
use crate::session::SessionStats;
use crate::settings::Settings;
use crate::theme;

/// How long status bar messages stay visible before auto-clearing.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Terminal rows taken by the header, status bar and their dividers.
pub const CHROME_ROWS: u16 = 4;

pub struct App {
    // --- Core state ---
    pub file_path: PathBuf,
    pub buffer: ChapterBuffer,
    pub settings: Settings,
    pub insert_mode: InsertMode,
    pub modified: bool,
    pub should_quit: bool,
    pub session: SessionStats,

    // --- Status bar ---
    pub status_message: String,
    pub status_time: Option<Instant>,

    // --- Help modal (F1) ---
    pub show_help: bool,

    /// Classification of the last buffer operation.
    pub last_change: Change,
}

impl App {
    /// Opens the chapter at `file_path` in an edit area `rows` lines tall and
    /// `settings.line_width` columns wide.
    pub fn new(file_path: PathBuf, settings: Settings, rows: usize) -> io::Result<Self> {
        let lines = chapter_file::load(&file_path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut buffer = ChapterBuffer::new();
        let setup = |buffer: &mut ChapterBuffer| -> BufferResult<()> {
            buffer.initialize(rows.max(1), settings.line_width)?;
            buffer.set_tab_spaces(&settings.tab_spaces())?;
            buffer.set_max_lines(settings.max_lines)?;
            buffer.load_lines(&lines)?;
            Ok(())
        };
        setup(&mut buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let session = SessionStats::new(
            buffer.word_count(),
            Duration::from_secs(settings.typing_pause_secs),
        );

        Ok(Self {
            file_path,
            buffer,
            settings,
            insert_mode: InsertMode::Insert,
            modified: false,
            should_quit: false,
            session,
            status_message: "F1: help | Ctrl+S: save | Ctrl+Q: quit".to_string(),
            status_time: Some(Instant::now()),
            show_help: false,
            last_change: Change::Unchanged,
        })
    }

    // ─── Tick / timers ───────────────────────────────────────────────────

    /// Called every 100ms from the main loop. Handles timer-based state cleanup.
    pub fn tick(&mut self) {
        // Auto-clear status messages after STATUS_DURATION
        if let Some(time) = self.status_time {
            if time.elapsed() >= STATUS_DURATION {
                self.status_message.clear();
                self.status_time = None;
            }
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Top-level event handler. Dispatches to key or paste handlers.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            // Bracketed paste: terminal sends entire clipboard as one event
            // (enabled via EnableBracketedPaste in main.rs)
            Event::Paste(text) => self.handle_paste(&text),
            // The edit area size is fixed when the chapter opens.
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    /// Shows a temporary message in the status bar.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = msg.to_string();
        self.status_time = Some(Instant::now());
    }

    /// Runs a text-changing buffer operation and records the outcome.
    fn edit<F>(&mut self, op: F)
    where
        F: FnOnce(&mut ChapterBuffer, InsertMode) -> BufferResult<Change>,
    {
        let result = op(&mut self.buffer, self.insert_mode);
        self.last_change = Change::from_result(&result);
        match result {
            Ok(change) if change.is_edit() => {
                self.modified = true;
                self.session
                    .record_edit(self.buffer.word_count(), Instant::now());
            }
            Ok(_) => {}
            Err(e) => self.reject(e),
        }
    }

    /// Moves the cursor. Bumping into either end of the chapter is reported
    /// in the status bar but is not worth a log line.
    fn navigate(&mut self, direction: CursorMove) {
        let result = self.buffer.move_cursor(direction);
        self.last_change = Change::from_result(&result);
        if let Err(e) = result {
            self.set_status(&e.to_string());
        }
    }

    /// Scrolls the viewport, then pulls the cursor back into view if it was
    /// left behind.
    fn scroll_view(&mut self, scroll: Scroll) {
        match self.buffer.scroll(scroll) {
            Ok(true) => {
                let top = self.buffer.top_index();
                let bottom = self.buffer.bottom_index();
                let cursor = self.buffer.cursor();
                let row = cursor.row.clamp(top, bottom);
                let len = self.buffer.character_count_in_row(row).unwrap_or(0);
                let result = self.buffer.set_cursor(row, cursor.col.min(len));
                self.last_change = match result {
                    Ok(_) => Change::Document,
                    Err(ref e) => {
                        tracing::error!(error = %e, "cursor lost after scroll");
                        Change::Rejected
                    }
                };
            }
            Ok(false) => self.last_change = Change::Unchanged,
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, e: BufferError) {
        if e.is_user_error() {
            tracing::warn!(error = %e, "edit rejected");
        } else {
            tracing::error!(error = %e, "buffer operation failed");
        }
        self.last_change = Change::from_result(&Err(e.clone()));
        self.set_status(&e.to_string());
    }
}

mod input;
mod render;
mod save;

#[cfg(test)]
mod tests;
