//! Unit tests for the App module: key dispatch, paste, scrolling, saving
//! and status timers.

use super::*;
use crate::buffer::Position;
use tempfile::NamedTempFile;

// ─── Helpers ─────────────────────────────────────────────────────

/// Creates an App over a temp chapter file holding `lines`, with a
/// 20-column, 5-row edit area.
fn app_with_lines(lines: &[&str]) -> (App, NamedTempFile) {
    let mut tmp = NamedTempFile::new().unwrap();
    chapter_file::write_body(&mut tmp, lines).unwrap();
    let settings = Settings {
        line_width: 20,
        ..Settings::default()
    };
    let app = App::new(tmp.path().to_path_buf(), settings, 5).unwrap();
    (app, tmp)
}

fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl_key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::CONTROL))
}

fn char_event(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_event(char_event(ch));
    }
}

// ─── Typing ──────────────────────────────────────────────────────

#[test]
fn typing_inserts_and_marks_modified() {
    let (mut app, _tmp) = app_with_lines(&["hello>"]);
    app.handle_event(key_event(KeyCode::End));
    type_text(&mut app, " world");
    assert_eq!(app.buffer.line(0), Some("hello world>"));
    assert!(app.modified);
    assert_eq!(app.session.words_added(), 1);
    assert_eq!(app.session.edits(), 6);
}

#[test]
fn typing_past_width_wraps_at_word() {
    let (mut app, _tmp) = app_with_lines(&[]);
    type_text(&mut app, "the quick brown fox jumps");
    assert_eq!(app.buffer.lines(), &["the quick brown fox", "jumps"]);
    assert_eq!(app.buffer.cursor(), Position::new(1, 5));
}

#[test]
fn shifted_characters_are_typed() {
    let (mut app, _tmp) = app_with_lines(&[]);
    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('A'),
        KeyModifiers::SHIFT,
    )));
    assert_eq!(app.buffer.line(0), Some("A"));
}

#[test]
fn key_release_is_ignored() {
    let (mut app, _tmp) = app_with_lines(&[]);
    let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    app.handle_event(Event::Key(release));
    assert_eq!(app.buffer.line(0), Some(""));
}

#[test]
fn reserved_character_is_rejected_with_status() {
    let (mut app, _tmp) = app_with_lines(&["abc>"]);
    app.handle_event(char_event('<'));
    assert_eq!(app.buffer.line(0), Some("abc>"));
    assert!(!app.modified);
    assert_eq!(app.last_change, Change::Rejected);
    assert!(app.status_message.contains("reserved"), "{}", app.status_message);
}

#[test]
fn insert_key_toggles_overwrite() {
    let (mut app, _tmp) = app_with_lines(&["abc>"]);
    app.handle_event(key_event(KeyCode::Insert));
    assert_eq!(app.insert_mode, InsertMode::Overwrite);
    app.handle_event(char_event('X'));
    assert_eq!(app.buffer.line(0), Some("Xbc>"));
    app.handle_event(key_event(KeyCode::Insert));
    assert_eq!(app.insert_mode, InsertMode::Insert);
}

#[test]
fn tab_inserts_configured_spaces() {
    let (mut app, _tmp) = app_with_lines(&["x>"]);
    app.handle_event(key_event(KeyCode::Tab));
    assert_eq!(app.buffer.line(0), Some("    x>"));
    assert_eq!(app.buffer.cursor(), Position::new(0, 4));
}

// ─── Paragraphs and deletion ─────────────────────────────────────

#[test]
fn enter_splits_paragraph_at_cursor() {
    let (mut app, _tmp) = app_with_lines(&["abcdef>"]);
    for _ in 0..3 {
        app.handle_event(key_event(KeyCode::Right));
    }
    app.handle_event(key_event(KeyCode::Enter));
    assert_eq!(app.buffer.lines(), &["abc>", "def>"]);
    assert_eq!(app.buffer.cursor(), Position::new(1, 0));
    assert_eq!(app.last_change, Change::Document);
}

#[test]
fn backspace_at_line_start_joins_paragraphs() {
    let (mut app, _tmp) = app_with_lines(&["abc>", "def>"]);
    app.handle_event(key_event(KeyCode::Down));
    app.handle_event(key_event(KeyCode::Backspace));
    assert_eq!(app.buffer.lines(), &["abcdef>"]);
    assert!(app.modified);
}

#[test]
fn delete_at_end_of_chapter_reports_boundary() {
    let (mut app, _tmp) = app_with_lines(&["ab"]);
    app.handle_event(ctrl_key(KeyCode::End));
    app.handle_event(key_event(KeyCode::Delete));
    assert_eq!(app.status_message, "cannot move beyond the end");
    assert_eq!(app.last_change, Change::Rejected);
}

#[test]
fn ctrl_j_justifies_current_paragraph() {
    let (mut app, _tmp) = app_with_lines(&["one", "two", "three>", "four>"]);
    app.handle_event(ctrl_key(KeyCode::Char('j')));
    assert_eq!(app.buffer.lines(), &["one two three>", "four>"]);
    assert!(app.modified);
}

#[test]
fn ctrl_w_recounts_words() {
    let (mut app, _tmp) = app_with_lines(&["one two>", "three>"]);
    app.handle_event(ctrl_key(KeyCode::Char('w')));
    assert_eq!(app.status_message, "3 words, 0 edits, 0 pauses, 0:00 typing");
}

// ─── Navigation ──────────────────────────────────────────────────

#[test]
fn left_at_start_reports_without_modifying() {
    let (mut app, _tmp) = app_with_lines(&["abc>"]);
    app.handle_event(key_event(KeyCode::Left));
    assert_eq!(app.status_message, "cannot move beyond the start");
    assert_eq!(app.last_change, Change::Rejected);
    assert!(!app.modified);
}

#[test]
fn home_and_end_stay_on_line() {
    let (mut app, _tmp) = app_with_lines(&["abc>", "defgh>"]);
    app.handle_event(key_event(KeyCode::Down));
    app.handle_event(key_event(KeyCode::End));
    assert_eq!(app.buffer.cursor(), Position::new(1, 5));
    app.handle_event(key_event(KeyCode::Home));
    assert_eq!(app.buffer.cursor(), Position::new(1, 0));
}

fn twelve_paragraphs() -> Vec<String> {
    (0..12).map(|n| format!("line {n}>")).collect()
}

#[test]
fn page_down_pulls_cursor_into_view() {
    let lines = twelve_paragraphs();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let (mut app, _tmp) = app_with_lines(&refs);
    app.handle_event(key_event(KeyCode::PageDown));
    assert_eq!(app.buffer.bottom_index(), 9);
    assert_eq!(app.buffer.cursor(), Position::new(5, 0));
    assert_eq!(app.buffer.cursor_display_position(), Some((0, 0)));

    app.handle_event(key_event(KeyCode::PageDown));
    app.handle_event(key_event(KeyCode::PageDown));
    assert_eq!(app.buffer.bottom_index(), 11);
    assert_eq!(app.last_change, Change::Unchanged);
}

#[test]
fn ctrl_arrows_scroll_one_line() {
    let lines = twelve_paragraphs();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let (mut app, _tmp) = app_with_lines(&refs);
    app.handle_event(ctrl_key(KeyCode::Down));
    assert_eq!(app.buffer.bottom_index(), 5);
    assert_eq!(app.buffer.cursor().row, 1);
    app.handle_event(ctrl_key(KeyCode::Up));
    assert_eq!(app.buffer.bottom_index(), 4);
}

#[test]
fn ctrl_end_jumps_to_chapter_end() {
    let lines = twelve_paragraphs();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let (mut app, _tmp) = app_with_lines(&refs);
    app.handle_event(ctrl_key(KeyCode::End));
    assert_eq!(app.buffer.cursor(), Position::new(11, 7));
    assert_eq!(app.buffer.bottom_index(), 11);
    app.handle_event(ctrl_key(KeyCode::Home));
    assert_eq!(app.buffer.cursor(), Position::new(0, 0));
    assert_eq!(app.buffer.bottom_index(), 4);
}

// ─── Paste ───────────────────────────────────────────────────────

#[test]
fn paste_makes_one_paragraph_per_line() {
    let (mut app, _tmp) = app_with_lines(&[]);
    app.handle_event(Event::Paste("one\r\ntwo".to_string()));
    assert_eq!(app.buffer.lines(), &["one>", "two"]);
    assert!(app.modified);
}

#[test]
fn paste_with_bad_character_inserts_nothing() {
    let (mut app, _tmp) = app_with_lines(&["abc>"]);
    app.handle_event(Event::Paste("fine\nnot <fine>".to_string()));
    assert_eq!(app.buffer.lines(), &["abc>"]);
    assert!(!app.modified);
    assert!(app.status_message.contains("pasted text"));
}

#[test]
fn long_paste_after_existing_text_wraps() {
    let (mut app, _tmp) = app_with_lines(&["abc>"]);
    app.handle_event(key_event(KeyCode::End));
    app.handle_event(Event::Paste(" word".repeat(200)));
    assert_eq!(app.last_change, Change::Document);
    assert_eq!(app.buffer.word_count(), 201);
    assert!(app.buffer.lines().iter().all(|l| l.trim_end_matches('>').len() <= 20));
    assert!(app.modified);
}

// ─── Save / quit ─────────────────────────────────────────────────

#[test]
fn ctrl_s_writes_chapter_file() {
    let (mut app, tmp) = app_with_lines(&["abc>"]);
    app.handle_event(key_event(KeyCode::End));
    app.handle_event(key_event(KeyCode::Enter));
    type_text(&mut app, "next");
    app.handle_event(ctrl_key(KeyCode::Char('s')));
    assert!(!app.modified);
    assert_eq!(app.status_message, "Saved");
    let saved = chapter_file::load(tmp.path()).unwrap();
    assert_eq!(saved, vec!["abc>", "next>"]);
}

#[test]
fn ctrl_q_saves_modified_content_and_quits() {
    let (mut app, tmp) = app_with_lines(&["abc>"]);
    app.handle_event(char_event('x'));
    app.handle_event(ctrl_key(KeyCode::Char('q')));
    assert!(app.should_quit);
    let saved = chapter_file::load(tmp.path()).unwrap();
    assert_eq!(saved, vec!["xabc>"]);
}

#[test]
fn ctrl_q_without_changes_does_not_write() {
    let (mut app, tmp) = app_with_lines(&["abc>"]);
    std::fs::write(tmp.path(), "changed elsewhere").unwrap();
    app.handle_event(ctrl_key(KeyCode::Char('q')));
    assert!(app.should_quit);
    assert_eq!(std::fs::read_to_string(tmp.path()).unwrap(), "changed elsewhere");
}

#[test]
fn new_rejects_malformed_chapter() {
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "no tags here\n").unwrap();
    let err = App::new(tmp.path().to_path_buf(), Settings::default(), 10)
        .err()
        .unwrap();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn new_opens_missing_file_as_empty_chapter() {
    let dir = tempfile::TempDir::new().unwrap();
    let app = App::new(dir.path().join("chapter1.txt"), Settings::default(), 10).unwrap();
    assert_eq!(app.buffer.lines(), &[""]);
    assert!(!app.modified);
}

// ─── Help modal / timers / resize ────────────────────────────────

#[test]
fn any_key_dismisses_help_without_typing() {
    let (mut app, _tmp) = app_with_lines(&["abc>"]);
    app.handle_event(key_event(KeyCode::F(1)));
    assert!(app.show_help);
    app.handle_event(char_event('z'));
    assert!(!app.show_help);
    assert_eq!(app.buffer.line(0), Some("abc>"));
}

#[test]
fn tick_clears_status_after_timeout() {
    let (mut app, _tmp) = app_with_lines(&[]);
    app.set_status("hello");
    app.tick();
    assert_eq!(app.status_message, "hello");
    app.status_time = Some(Instant::now() - Duration::from_secs(4));
    app.tick();
    assert!(app.status_message.is_empty());
    assert!(app.status_time.is_none());
}

#[test]
fn resize_leaves_layout_alone() {
    let (mut app, _tmp) = app_with_lines(&["abc>"]);
    app.handle_event(Event::Resize(10, 3));
    assert_eq!(app.buffer.max_columns(), Some(20));
    assert_eq!(app.buffer.viewport_rows(), Some(5));
}
