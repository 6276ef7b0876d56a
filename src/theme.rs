use ratatui::style::{Color, Style};

// Base colors: Color::Reset inherits terminal defaults
pub const BG: Color = Color::Reset;
pub const FG: Color = Color::Reset;
pub const BORDER: Color = Color::DarkGray;

// UI elements
pub const BAR_BG: Color = Color::Reset;
pub const BAR_FG: Color = Color::Reset;
pub const HEADING: Color = Color::Rgb(130, 170, 255);
pub const LINK: Color = Color::Cyan;

// Edit area
pub const PARAGRAPH_MARK: Color = Color::DarkGray;

// Status indicators
pub const WARNING: Color = Color::Yellow;

// White for text on colored backgrounds
pub const WHITE: Color = Color::White;

// Tilde color for rows beyond the end of the chapter
pub const TILDE: Color = Color::DarkGray;

// Tab colors
pub const ACTIVE_TAB: Color = Color::Blue;
pub const INACTIVE_TAB: Color = Color::Gray;

// Pre-built styles
pub fn editor_style() -> Style {
    Style::default().fg(FG).bg(BG)
}

pub fn header_style() -> Style {
    Style::default().fg(BAR_FG).bg(BAR_BG)
}

pub fn status_style() -> Style {
    Style::default().fg(BAR_FG).bg(BAR_BG)
}
