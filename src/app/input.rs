//! Input handling: keyboard events and bracketed paste.

use super::*;
use crate::buffer::errors_in_text;

impl App {
    /// Handles bracketed paste events. Each pasted line becomes its own
    /// paragraph. Nothing is inserted if any line holds characters the
    /// chapter cannot store.
    pub(super) fn handle_paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let pieces: Vec<&str> = text.split('\n').collect();
        if let Some(message) = pieces
            .iter()
            .find_map(|piece| errors_in_text(piece, "pasted text"))
        {
            tracing::warn!(%message, "paste rejected");
            self.set_status(&message);
            self.last_change = Change::Rejected;
            return;
        }

        for (idx, piece) in pieces.iter().enumerate() {
            if idx > 0 {
                self.edit(|buffer, _| buffer.insert_para_break());
            }
            if !piece.is_empty() {
                self.edit(|buffer, mode| buffer.insert_text(piece, mode));
            }
            if matches!(self.last_change, Change::CapacityExceeded | Change::Rejected) {
                break;
            }
        }
    }

    // ─── Key handling ────────────────────────────────────────────────────

    /// Main key handler. Processes the help modal first, then global
    /// keybindings, then editing and navigation keys.
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        // Some terminals report releases as well as presses
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Help modal: any key dismisses it (swallows the keypress)
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                if self.modified {
                    self.save();
                }
                self.should_quit = true;
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                self.save();
                return;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        self.handle_editor_key(key);
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            // Re-justify the paragraph under the cursor
            (KeyModifiers::CONTROL, KeyCode::Char('j')) => {
                let row = self.buffer.cursor().row;
                self.edit(|buffer, _| buffer.left_justify_lines_in_paragraph(row));
            }
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                let words = self.buffer.refresh_word_count();
                self.set_status(&format!("{words} words, {}", self.session.summary()));
            }
            (KeyModifiers::CONTROL, KeyCode::Home) => self.navigate(CursorMove::StartOfDocument),
            (KeyModifiers::CONTROL, KeyCode::End) => self.navigate(CursorMove::EndOfDocument),
            (KeyModifiers::CONTROL, KeyCode::Up) => self.scroll_view(Scroll::LineUp),
            (KeyModifiers::CONTROL, KeyCode::Down) => self.scroll_view(Scroll::LineDown),

            (_, KeyCode::Left) => self.navigate(CursorMove::PreviousCol),
            (_, KeyCode::Right) => self.navigate(CursorMove::NextCol),
            (_, KeyCode::Up) => self.navigate(CursorMove::PreviousRow),
            (_, KeyCode::Down) => self.navigate(CursorMove::NextRow),
            (_, KeyCode::Home) => self.navigate(CursorMove::StartOfLine),
            (_, KeyCode::End) => self.navigate(CursorMove::EndOfLine),
            (_, KeyCode::PageUp) => self.scroll_view(Scroll::PageUp),
            (_, KeyCode::PageDown) => self.scroll_view(Scroll::PageDown),

            (_, KeyCode::Insert) => {
                self.insert_mode = match self.insert_mode {
                    InsertMode::Insert => InsertMode::Overwrite,
                    InsertMode::Overwrite => InsertMode::Insert,
                };
            }

            (_, KeyCode::Enter) => self.edit(|buffer, _| buffer.insert_para_break()),
            (_, KeyCode::Backspace) => self.edit(|buffer, _| buffer.backspace()),
            (_, KeyCode::Delete) => self.edit(|buffer, _| buffer.delete_character()),
            (_, KeyCode::Tab) => self.edit(|buffer, mode| buffer.insert_text("\t", mode)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(ch)) => {
                let mut buf = [0u8; 4];
                let text = ch.encode_utf8(&mut buf);
                self.edit(|buffer, mode| buffer.insert_text(text, mode));
            }
            _ => {}
        }
    }
}
