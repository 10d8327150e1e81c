//! Output sink
//!
//! Results either go to a writer (stdout) or replace a file. Files are
//! written through a temp file in the same directory and renamed into place,
//! so a failed write never leaves a truncated destination behind.

use crate::document::text_lines;
use crate::engine::Destination;
use crate::error::{Result, RsedError};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

pub struct OutputSink<W: Write> {
    out: W,
    /// Print results when no file destination is set
    print: bool,
}

impl<W: Write> OutputSink<W> {
    pub fn new(out: W, print: bool) -> Self {
        Self { out, print }
    }

    pub fn emit(&mut self, text: &str, destination: &Destination) -> Result<()> {
        match destination {
            Destination::File(path) => {
                write_lines(path, text)?;
                writeln!(self.out, "wrote to {}", path.display())?;
            }
            Destination::Stdout if self.print => {
                let text = text.trim_end();
                if !text.is_empty() {
                    writeln!(self.out, "{}", text)?;
                }
            }
            Destination::Stdout => {}
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Write `text` to `path`, one line per write, each ending in `\n`
pub fn write_lines(path: &Path, text: &str) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| {
        RsedError::Io(format!("Failed to create temp file in {}: {}", parent_dir.display(), e))
    })?;

    // Scope the writer so it is flushed and dropped before the rename
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        for line in text_lines(text) {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
    }

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp_file.path(), metadata.permissions())?;
    }

    temp_file
        .persist(path)
        .map_err(|e| RsedError::Io(format!("Failed to write {}: {}", path.display(), e.error)))?;

    info!(path = %path.display(), "output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_print_to_writer() {
        let mut sink = OutputSink::new(Vec::new(), true);
        sink.emit("hello\nworld\n\n", &Destination::Stdout).unwrap();
        assert_eq!(String::from_utf8(sink.out).unwrap(), "hello\nworld\n");
    }

    #[test]
    fn test_print_disabled() {
        let mut sink = OutputSink::new(Vec::new(), false);
        sink.emit("hello", &Destination::Stdout).unwrap();
        assert!(sink.out.is_empty());
    }

    #[test]
    fn test_empty_text_prints_nothing() {
        let mut sink = OutputSink::new(Vec::new(), true);
        sink.emit("", &Destination::Stdout).unwrap();
        assert!(sink.out.is_empty());
    }

    #[test]
    fn test_write_file_normalizes_terminators() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = OutputSink::new(Vec::new(), true);
        sink.emit("a\r\nb\rc", &Destination::File(path.clone())).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc\n");
        let confirmation = String::from_utf8(sink.out).unwrap();
        assert_eq!(confirmation, format!("wrote to {}\n", path.display()));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "old contents that are longer\n").unwrap();

        write_lines(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(matches!(write_lines(&path, "x"), Err(RsedError::Io(_))));
        assert!(!path.exists());
    }
}
