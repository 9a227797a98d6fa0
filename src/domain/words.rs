//! Word-list loading
//!
//! Candidates are read from a `.txt` file, one label per line.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{DaddyError, Result};

/// Accepted input file extension
pub const INPUT_EXTENSION: &str = "txt";

/// Reject anything that is not a `.txt` path
pub fn check_extension(path: &Path) -> Result<()> {
    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
        .unwrap_or(false);

    if is_txt {
        Ok(())
    } else {
        Err(DaddyError::usage(format!(
            "Invalid value for 'FILENAME': '{}' is not a TXT file.",
            path.display()
        )))
    }
}

/// Load the candidate labels from `path`.
///
/// Labels are trimmed and lower-cased; blank lines are dropped and duplicates
/// keep their first position.
pub fn load_candidates(path: &Path) -> Result<Vec<String>> {
    check_extension(path)?;

    if path.is_dir() {
        return Err(DaddyError::usage(format!(
            "Invalid value for 'FILENAME': '{}' is a directory.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| DaddyError::io(e.to_string(), Some(path)))?;

    let candidates = normalize(content.lines());
    tracing::debug!(
        path = %path.display(),
        candidates = candidates.len(),
        "Loaded word list"
    );

    Ok(candidates)
}

/// Trim, lower-case and deduplicate labels
pub fn normalize<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .map(|line| line.trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(label.clone()))
        .collect()
}
