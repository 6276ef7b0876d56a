//! UI rendering: main frame layout, edit area and help modal overlay.

use super::*;

impl App {
    /// Runs one frame of the main loop: draw + tick.
    /// This is the canonical render path -- tested by render_test to ensure
    /// no accidental screen clears (which cause flicker).
    pub fn render_frame<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        self.tick();
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let full = frame.area();

        // Fill entire frame background first
        let bg = Paragraph::new("").style(theme::editor_style());
        frame.render_widget(bg, full);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Divider
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Divider
            Constraint::Length(1), // Status
        ])
        .split(full);

        let filename = self
            .file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled");
        header::render(frame, chunks[0], filename, self.modified, self.insert_mode);

        // Thin dividers between bars and content
        let divider_style = Style::default().fg(theme::BORDER);
        let top_divider = Paragraph::new("\u{2500}".repeat(chunks[1].width as usize))
            .style(divider_style);
        frame.render_widget(top_divider, chunks[1]);
        let bottom_divider = Paragraph::new("\u{2500}".repeat(chunks[3].width as usize))
            .style(divider_style);
        frame.render_widget(bottom_divider, chunks[3]);

        self.render_editor(frame, chunks[2]);

        let cursor = self.buffer.cursor();
        status::render(
            frame,
            chunks[4],
            status::StatusInfo {
                line: cursor.row + 1,
                col: cursor.col + 1,
                message: &self.status_message,
                word_count: self.buffer.word_count(),
                session_words: self.session.words_added(),
                modified: self.modified,
            },
        );

        // Help modal overlay -- rendered last so it sits on top of everything
        if self.show_help {
            self.render_help(frame);
        }
    }

    /// Renders the visible chapter rows centred in `area` and places the
    /// terminal cursor.
    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let rows = self
            .buffer
            .viewport_rows()
            .unwrap_or(0)
            .min(area.height as usize);
        let lines = match self.buffer.lines_for_display(rows) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::error!(error = %e, "cannot lay out edit area");
                return;
            }
        };
        let top = self.buffer.top_index();
        let paragraph_ends: Vec<bool> = (top..top + rows)
            .map(|row| self.buffer.is_paragraph_end(row).unwrap_or(false))
            .collect();

        // Room for the widest line plus its paragraph mark
        let width = self.buffer.max_columns().unwrap_or(0) as u16 + 1;
        let text_area = editor::centered(area, width);
        editor::render(
            frame,
            text_area,
            &lines,
            &paragraph_ends,
            self.buffer.line_count().saturating_sub(top),
            self.settings.show_paragraph_marks,
        );

        if !self.show_help {
            if let Some((row, col)) = self.buffer.cursor_display_position() {
                let x = text_area.x + col as u16;
                let y = text_area.y + row as u16;
                if x < area.right() && y < area.bottom() {
                    frame.set_cursor_position((x, y));
                }
            }
        }
    }

    /// Renders a centered modal overlay listing all keybindings.
    /// Dismissed by pressing any key.
    fn render_help(&self, frame: &mut Frame) {
        let area = frame.area();
        // Size the modal to fit content, clamped to terminal size
        let width = 45u16.min(area.width.saturating_sub(4));
        let height = 22u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(x, y, width, height);

        // Clear the area behind the modal
        frame.render_widget(Clear, help_area);

        // Help content -- must match the actual keybinding handlers!
        let bindings = [
            ("Ctrl+S", "Save"),
            ("Ctrl+Q", "Save & quit"),
            ("F1", "This help"),
            ("", ""),
            ("Enter", "New paragraph"),
            ("Insert", "Toggle insert / overwrite"),
            ("Tab", "Insert tab spaces"),
            ("Ctrl+J", "Re-justify paragraph"),
            ("Ctrl+W", "Word count and session"),
            ("", ""),
            ("Home / End", "Line start / end"),
            ("Ctrl+Home / End", "Chapter start / end"),
            ("PgUp / PgDn", "Scroll a page"),
            ("Ctrl+Up / Down", "Scroll a line"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default()
                    .fg(theme::HEADING)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        help_text.extend(bindings.iter().map(|(keys, action)| {
            if keys.is_empty() {
                Line::from("")
            } else {
                Line::from(vec![
                    Span::styled(format!("  {keys:<17}"), Style::default().fg(theme::LINK)),
                    Span::raw(*action),
                ])
            }
        }));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().fg(theme::FG).bg(theme::BAR_BG));

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, help_area);
    }
}
