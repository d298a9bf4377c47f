//! Destinations for export text.
//!
//! `copy` hands the text to a [`ClipboardSink`]; `download` writes it to a
//! file through a [`FileSink`]. Both sit behind [`TextSink`] so the export
//! command does not care where the text ends up.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::info;

/// Somewhere export text can be delivered.
pub trait TextSink {
    /// Delivers `text`, returning a description of where it went.
    ///
    /// `file_name` is only meaningful to sinks that create files.
    fn deliver(&mut self, file_name: &str, text: &str) -> io::Result<String>;
}

/// In-process clipboard holding the most recently copied text.
///
/// A terminal has no portable system clipboard; the copy command prints
/// what it stored so the user can select it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardSink {
    contents: Option<String>,
}

impl ClipboardSink {
    pub fn new() -> Self {
        ClipboardSink::default()
    }

    /// The last copied text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl TextSink for ClipboardSink {
    fn deliver(&mut self, _file_name: &str, text: &str) -> io::Result<String> {
        self.contents = Some(text.to_string());
        Ok("clipboard".to_string())
    }
}

/// Writes each export as a file in a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSink { dir: dir.into() }
    }
}

impl TextSink for FileSink {
    fn deliver(&mut self, file_name: &str, text: &str) -> io::Result<String> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, text)?;

        info!(path = %path.display(), bytes = text.len(), "Export written");
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_keeps_last_text() {
        let mut clipboard = ClipboardSink::new();
        assert!(clipboard.contents().is_none());

        clipboard.deliver("a.txt", "first").unwrap();
        let destination = clipboard.deliver("b.txt", "second").unwrap();

        assert_eq!(destination, "clipboard");
        assert_eq!(clipboard.contents(), Some("second"));
    }

    #[test]
    fn test_file_sink_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let mut sink = FileSink::new(&target);

        let written = sink.deliver("GST_Calculation_1.txt", "hello").unwrap();

        let path = target.join("GST_Calculation_1.txt");
        assert_eq!(written, path.display().to_string());
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}
