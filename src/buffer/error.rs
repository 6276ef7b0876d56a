use thiserror::Error;

pub type BufferResult<T> = Result<T, BufferError>;

/// Reasons a buffer operation was refused. A refused operation never leaves
/// a partial edit behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("chapter is full: at most {max} lines")]
    DocumentFull { max: usize },
    #[error("line {line} is too long: {len} characters (max {max})")]
    LineTooLong { line: usize, len: usize, max: usize },
    #[error("{0}")]
    InvalidText(String),
    #[error("cannot move beyond the start")]
    BeyondStart,
    #[error("cannot move beyond the end")]
    BeyondEnd,
    #[error("chapter buffer used before initialization")]
    NotInitialized,
    #[error("chapter buffer is already initialized")]
    AlreadyInitialized,
}

/// Broad classes of [`BufferError`], used by callers to pick how loudly to
/// report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Out-of-range argument; a caller bug.
    Parameter,
    /// Line count or line length ceiling reached.
    Capacity,
    /// Disallowed characters in user text.
    Content,
    /// Cursor or deletion ran into the start or end of the chapter.
    Boundary,
    /// Buffer used in the wrong lifecycle state.
    Program,
}

impl BufferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BufferError::InvalidParameter(_) => ErrorKind::Parameter,
            BufferError::DocumentFull { .. } | BufferError::LineTooLong { .. } => {
                ErrorKind::Capacity
            }
            BufferError::InvalidText(_) => ErrorKind::Content,
            BufferError::BeyondStart | BufferError::BeyondEnd => ErrorKind::Boundary,
            BufferError::NotInitialized | BufferError::AlreadyInitialized => ErrorKind::Program,
        }
    }

    /// True for errors the user caused and can fix by editing differently.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Capacity | ErrorKind::Content | ErrorKind::Boundary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_errors_are_distinct_from_parameter_errors() {
        assert_eq!(BufferError::DocumentFull { max: 3 }.kind(), ErrorKind::Capacity);
        assert_eq!(
            BufferError::LineTooLong { line: 1, len: 2000, max: 1024 }.kind(),
            ErrorKind::Capacity
        );
        assert_eq!(
            BufferError::InvalidParameter("row".into()).kind(),
            ErrorKind::Parameter
        );
        assert_eq!(BufferError::InvalidText("bad".into()).kind(), ErrorKind::Content);
    }

    #[test]
    fn program_errors_are_not_user_errors() {
        assert!(!BufferError::NotInitialized.is_user_error());
        assert!(!BufferError::InvalidParameter("x".into()).is_user_error());
        assert!(BufferError::BeyondEnd.is_user_error());
        assert!(BufferError::DocumentFull { max: 1 }.is_user_error());
    }

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            BufferError::DocumentFull { max: 10 }.to_string(),
            "chapter is full: at most 10 lines"
        );
        assert_eq!(BufferError::BeyondStart.to_string(), "cannot move beyond the start");
    }
}
