//! Output file handling

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{DaddyError, Result};
use crate::types::OutputMode;

/// Result of the final write step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Lines were written to the output file
    Written(usize),
    /// Nothing was available; the output file was left alone
    NothingAvailable,
}

/// Whether the output path already holds a file the user must decide about.
///
/// A directory at the output path is a usage error.
pub fn output_conflict(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Err(DaddyError::usage(format!(
            "Invalid value for '-o' / '--output-file': '{}' is a directory.",
            path.display()
        )));
    }
    Ok(path.exists())
}

/// Write the available lines joined by newlines, without a trailing one.
///
/// An empty list leaves the file untouched, whatever the mode.
pub fn write_available(path: &Path, lines: &[String], mode: OutputMode) -> Result<WriteOutcome> {
    if lines.is_empty() {
        return Ok(WriteOutcome::NothingAvailable);
    }

    let io_err = |e: std::io::Error| DaddyError::io(e.to_string(), Some(path));

    let mut file = match mode {
        OutputMode::Create | OutputMode::Overwrite => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path),
        OutputMode::Append => OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path),
    }
    .map_err(io_err)?;

    let mut content = lines.join("\n");
    if mode == OutputMode::Append && needs_separator(&mut file).map_err(io_err)? {
        content.insert(0, '\n');
    }

    file.write_all(content.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;

    tracing::debug!(path = %path.display(), lines = lines.len(), ?mode, "Wrote output file");
    Ok(WriteOutcome::Written(lines.len()))
}

/// True when the file is non-empty and its last byte is not a newline
fn needs_separator(file: &mut std::fs::File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("available.txt");

        let outcome = write_available(
            &path,
            &lines(&["a.com : USD 1.00", "b.com : USD 2.50"]),
            OutputMode::Create,
        )
        .unwrap();

        assert_eq!(outcome, WriteOutcome::Written(2));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "a.com : USD 1.00\nb.com : USD 2.50"
        );
    }

    #[test]
    fn test_nothing_available_does_not_create() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("available.txt");

        let outcome = write_available(&path, &[], OutputMode::Create).unwrap();
        assert_eq!(outcome, WriteOutcome::NothingAvailable);
        assert!(!path.exists());
    }

    #[test]
    fn test_nothing_available_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("available.txt");
        std::fs::write(&path, "old.com : USD 3.00").unwrap();

        write_available(&path, &[], OutputMode::Overwrite).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old.com : USD 3.00");
    }

    #[test]
    fn test_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("available.txt");
        std::fs::write(&path, "old.com : USD 3.00\nolder.com : USD 4.00").unwrap();

        write_available(&path, &lines(&["new.com : USD 1.00"]), OutputMode::Overwrite).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new.com : USD 1.00");
    }

    #[test]
    fn test_append_inserts_separator() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("available.txt");
        std::fs::write(&path, "old.com : USD 3.00").unwrap();

        write_available(&path, &lines(&["new.com : USD 1.00"]), OutputMode::Append).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "old.com : USD 3.00\nnew.com : USD 1.00"
        );
    }

    #[test]
    fn test_append_after_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("available.txt");
        std::fs::write(&path, "old.com : USD 3.00\n").unwrap();

        write_available(&path, &lines(&["new.com : USD 1.00"]), OutputMode::Append).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "old.com : USD 3.00\nnew.com : USD 1.00"
        );
    }

    #[test]
    fn test_conflict_detection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("available.txt");
        assert!(!output_conflict(&path).unwrap());

        std::fs::write(&path, "").unwrap();
        assert!(output_conflict(&path).unwrap());

        assert!(matches!(
            output_conflict(dir.path()).unwrap_err(),
            DaddyError::Usage { .. }
        ));
    }
}
