//! Editor settings, read from an optional JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{DEFAULT_MAX_LINES, MAX_COLUMNS, MIN_COLUMNS};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("setting `{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Missing fields take their defaults, so `{}` is a valid settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Characters per line in the edit area.
    pub line_width: usize,
    pub max_lines: usize,
    /// Spaces typed for a tab.
    pub tab_size: usize,
    pub show_paragraph_marks: bool,
    /// A gap between edits longer than this counts as a typing pause.
    pub typing_pause_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            line_width: 68,
            max_lines: DEFAULT_MAX_LINES,
            tab_size: 4,
            show_paragraph_marks: true,
            typing_pause_secs: 30,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&self.line_width) {
            return Err(SettingsError::Invalid {
                field: "line_width",
                reason: format!("must be between {MIN_COLUMNS} and {MAX_COLUMNS}"),
            });
        }
        if self.max_lines == 0 {
            return Err(SettingsError::Invalid {
                field: "max_lines",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=16).contains(&self.tab_size) {
            return Err(SettingsError::Invalid {
                field: "tab_size",
                reason: "must be between 1 and 16".to_string(),
            });
        }
        Ok(())
    }

    pub fn tab_spaces(&self) -> String {
        " ".repeat(self.tab_size)
    }
}
