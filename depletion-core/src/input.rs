//! Input abstraction for line processing

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Source of scenario lines
pub enum Input {
    /// In-memory text
    Text(String),
    /// A file on disk, streamed line by line
    File(PathBuf),
    /// Standard input
    Stdin,
    /// Any other reader (boxed for object safety)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f
                .debug_struct("Input::Text")
                .field("length", &text.len())
                .finish(),
            Input::File(path) => f.debug_struct("Input::File").field("path", path).finish(),
            Input::Stdin => f.write_str("Input::Stdin"),
            Input::Reader(_) => f.debug_struct("Input::Reader").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Input::File(path.as_ref().to_path_buf())
    }

    /// Create input from reader
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Short human-readable name, used in logs and error context
    pub fn name(&self) -> String {
        match self {
            Input::Text(_) => "<text>".to_string(),
            Input::File(path) => path.display().to_string(),
            Input::Stdin => "<stdin>".to_string(),
            Input::Reader(_) => "<reader>".to_string(),
        }
    }

    /// Open the input as a buffered line reader
    pub fn into_buf_read(self) -> io::Result<Box<dyn BufRead + Send>> {
        Ok(match self {
            Input::Text(text) => Box::new(Cursor::new(text.into_bytes())),
            Input::File(path) => Box::new(BufReader::new(File::open(path)?)),
            Input::Stdin => Box::new(BufReader::new(io::stdin())),
            Input::Reader(reader) => Box::new(BufReader::new(reader)),
        })
    }
}
