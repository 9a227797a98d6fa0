//! API credential resolution
//!
//! Credentials come either from both `-k` and `-s` flags or, when neither is
//! given, from a JSON file `{"key": "...", "secret": "..."}` in the per-user
//! config directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DaddyError, Result};
use crate::types::Credentials;

/// Application directory name inside the platform config dir
pub const APP_DIR: &str = "daddy";

/// Credentials file name inside the application directory
pub const CONFIG_FILE: &str = "config";

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    key: Option<String>,
    secret: Option<String>,
}

/// Default location of the credentials file, e.g. `~/.config/daddy/config`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| DaddyError::config("Could not determine the user config directory."))
}

/// Resolve credentials from the command line, falling back to the default config file
pub fn resolve(key: Option<String>, secret: Option<String>) -> Result<Credentials> {
    match from_flags(key, secret)? {
        Some(creds) => Ok(creds),
        None => load_from_file(&default_config_path()?),
    }
}

fn from_flags(key: Option<String>, secret: Option<String>) -> Result<Option<Credentials>> {
    match (key, secret) {
        (Some(key), Some(secret)) => Ok(Some(Credentials::new(key, secret))),
        (None, Some(_)) => Err(DaddyError::usage("-k / --key option not specified.")),
        (Some(_), None) => Err(DaddyError::usage("-s / --secret option not specified.")),
        (None, None) => Ok(None),
    }
}

/// Read credentials from a JSON config file
pub fn load_from_file(path: &Path) -> Result<Credentials> {
    if path.is_dir() {
        return Err(DaddyError::credentials(path, "Path is a directory, not a file."));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        let hint = match e.kind() {
            ErrorKind::NotFound => {
                "File does not exist and '-k' and '-s' options not supplied.".to_string()
            }
            ErrorKind::PermissionDenied => "File is not readable.".to_string(),
            _ => e.to_string(),
        };
        DaddyError::credentials(path, hint)
    })?;

    let parsed: CredentialsFile = serde_json::from_str(&content)
        .map_err(|_| DaddyError::credentials(path, "JSON formatting issues found."))?;

    let key = parsed
        .key
        .ok_or_else(|| DaddyError::credentials(path, "Key 'key' not present."))?;
    let secret = parsed
        .secret
        .ok_or_else(|| DaddyError::credentials(path, "Key 'secret' not present."))?;

    tracing::debug!(path = %path.display(), "Loaded credentials from config file");
    Ok(Credentials::new(key, secret))
}
