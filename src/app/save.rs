//! File saving: write the chapter to disk exactly as the buffer holds it.

use super::*;

impl App {
    /// Writes the chapter and resets the modified flag. Errors are reported in
    /// the status bar and leave the flag set.
    pub(super) fn save(&mut self) {
        match chapter_file::save(&self.file_path, self.buffer.lines()) {
            Ok(()) => {
                self.modified = false;
                self.set_status("Saved");
            }
            Err(e) => {
                tracing::error!(path = %self.file_path.display(), error = %e, "save failed");
                self.set_status(&format!("Error saving: {}", e));
            }
        }
    }
}
