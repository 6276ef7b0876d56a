//! Chapter file format: buffer lines framed by `<body>` and `</body>` tag
//! lines. Lines are stored exactly as the buffer holds them, paragraph
//! markers included, so nothing is re-wrapped on the way in or out.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

pub const BODY_OPEN: &str = "<body>";
pub const BODY_CLOSE: &str = "</body>";

#[derive(Debug, Error)]
pub enum ChapterFileError {
    #[error("line {line}: expected <body>, found {found:?}")]
    MissingOpenTag { line: usize, found: String },
    #[error("</body> not found before end of file (read {lines} lines)")]
    MissingCloseTag { lines: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads the lines between the body tags. Blank lines before `<body>` are
/// skipped; anything after `</body>` is ignored. An input holding only blank
/// lines is an empty chapter.
pub fn read_body<R: BufRead>(reader: R) -> Result<Vec<String>, ChapterFileError> {
    let mut lines = reader.lines();
    let mut line_no = 0;

    loop {
        let Some(line) = lines.next() else {
            return Ok(Vec::new());
        };
        let line = line?;
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        if line.trim_end() != BODY_OPEN {
            return Err(ChapterFileError::MissingOpenTag {
                line: line_no,
                found: line,
            });
        }
        break;
    }

    let mut body = Vec::new();
    for line in lines {
        let line = line?;
        if line == BODY_CLOSE {
            return Ok(body);
        }
        body.push(line);
    }
    Err(ChapterFileError::MissingCloseTag { lines: body.len() })
}

pub fn write_body<W: Write, S: AsRef<str>>(mut writer: W, lines: &[S]) -> io::Result<()> {
    writeln!(writer, "{BODY_OPEN}")?;
    for line in lines {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writeln!(writer, "{BODY_CLOSE}")?;
    writer.flush()
}

/// Loads a chapter. A file that does not exist yet opens as an empty chapter.
pub fn load(path: &Path) -> Result<Vec<String>, ChapterFileError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "new chapter");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    read_body(BufReader::new(file))
}

pub fn save<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    let file = File::create(path)?;
    write_body(BufWriter::new(file), lines)?;
    tracing::info!(path = %path.display(), lines = lines.len(), "chapter saved");
    Ok(())
}
