use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

/// Shown after the last line of each paragraph when paragraph marks are on.
pub const PARAGRAPH_MARK: &str = "\u{00B6}";

/// Centres a column `width` cells wide in `area`, or fills `area` when it is
/// narrower.
pub fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

/// Draws the visible rows. Rows at or past `content_rows` lie beyond the end
/// of the chapter and get a tilde marker instead.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    lines: &[String],
    paragraph_ends: &[bool],
    content_rows: usize,
    show_marks: bool,
) {
    let mark_style = Style::default().fg(theme::PARAGRAPH_MARK);
    let mut text: Vec<Line> = Vec::with_capacity(area.height as usize);

    for (idx, line) in lines.iter().enumerate() {
        if idx >= content_rows {
            text.push(Line::from(Span::styled("~", Style::default().fg(theme::TILDE))));
            continue;
        }
        let mut spans = vec![Span::styled(line.as_str(), theme::editor_style())];
        if show_marks && paragraph_ends.get(idx).copied().unwrap_or(false) {
            spans.push(Span::styled(PARAGRAPH_MARK, mark_style));
        }
        text.push(Line::from(spans));
    }
    // Rows below the edit area's fixed height
    while text.len() < area.height as usize {
        text.push(Line::from(Span::styled("~", Style::default().fg(theme::TILDE))));
    }

    frame.render_widget(Paragraph::new(text).style(theme::editor_style()), area);
}
