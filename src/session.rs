//! Per-session writing statistics, owned by the app.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SessionStats {
    start_words: usize,
    current_words: usize,
    pause_threshold: Duration,
    edits: usize,
    pauses: usize,
    typing_time: Duration,
    last_edit: Option<Instant>,
}

impl SessionStats {
    pub fn new(start_words: usize, pause_threshold: Duration) -> Self {
        Self {
            start_words,
            current_words: start_words,
            pause_threshold,
            edits: 0,
            pauses: 0,
            typing_time: Duration::ZERO,
            last_edit: None,
        }
    }

    /// Records an edit that left the chapter at `words` words. A gap since
    /// the previous edit longer than the pause threshold counts as a pause
    /// and is not added to typing time.
    pub fn record_edit(&mut self, words: usize, now: Instant) {
        if let Some(last) = self.last_edit {
            let gap = now.saturating_duration_since(last);
            if gap > self.pause_threshold {
                self.pauses += 1;
                tracing::debug!(gap_secs = gap.as_secs(), "typing pause");
            } else {
                self.typing_time += gap;
            }
        }
        self.last_edit = Some(now);
        self.current_words = words;
        self.edits += 1;
    }

    /// Net words added this session; negative after cutting text.
    pub fn words_added(&self) -> i64 {
        self.current_words as i64 - self.start_words as i64
    }

    pub fn edits(&self) -> usize {
        self.edits
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }

    pub fn typing_time(&self) -> Duration {
        self.typing_time
    }

    /// One-line report for the status bar.
    pub fn summary(&self) -> String {
        let secs = self.typing_time.as_secs();
        format!(
            "{} edits, {} pauses, {}:{:02} typing",
            self.edits,
            self.pauses,
            secs / 60,
            secs % 60
        )
    }
}
