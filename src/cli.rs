//! Command line interface

use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use inquire::{InquireError, Select};

use crate::credentials;
use crate::error::{DaddyError, Result};
use crate::types::{
    ConflictChoice, Credentials, OutputMode, RunConfig, DEFAULT_API_URL, DEFAULT_OUTPUT_FILE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_TLD,
};

/// Check availability of domains listed in FILENAME at godaddy.com.
#[derive(Debug, Clone, Parser)]
#[command(name = "daddy", version)]
pub struct Cli {
    /// TXT file with one domain name (without TLD) per line
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    /// Name of the output TXT file in which to store available domain names
    #[arg(short, long = "output-file", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// API key for godaddy.com
    #[arg(short, long)]
    pub key: Option<String>,

    /// API secret for godaddy.com
    #[arg(short, long)]
    pub secret: Option<String>,

    /// Top level domain (e.g. 'com')
    #[arg(short, long, default_value = DEFAULT_TLD)]
    pub tld: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Base URL of the registrar API
    #[arg(long, env = "DADDY_API_URL", default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,
}

impl Cli {
    /// Build the run configuration, resolving credentials from flags or the config file
    pub fn into_run_config(mut self) -> Result<RunConfig> {
        let credentials = credentials::resolve(self.key.take(), self.secret.take())?;
        Ok(self.build(credentials))
    }

    fn build(self, credentials: Credentials) -> RunConfig {
        RunConfig::new(self.filename, self.output_file, &self.tld, credentials)
            .with_api_base_url(self.api_url)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Ask how to deal with an existing output file.
///
/// Without a terminal the answer is read from stdin as `1`, `2` or `3`;
/// an empty answer or end of input aborts.
pub fn prompt_conflict(output: &Path) -> Result<OutputMode> {
    let message = format!(
        "Warning: {} already exists. How to proceed?",
        output.display()
    );

    let choice = if std::io::stdin().is_terminal() {
        match Select::new(&message, ConflictChoice::ALL.to_vec())
            .with_starting_cursor(0)
            .prompt()
        {
            Ok(choice) => choice,
            Err(InquireError::NotTTY) => read_choice(&message, std::io::stdin().lock())?,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Err(DaddyError::Aborted)
            }
            Err(other) => return Err(DaddyError::config(other.to_string())),
        }
    } else {
        read_choice(&message, std::io::stdin().lock())?
    };

    tracing::debug!(?choice, "Output conflict resolved");
    choice.output_mode().ok_or(DaddyError::Aborted)
}

/// Numbered fallback prompt for piped input
fn read_choice<R: BufRead>(message: &str, mut input: R) -> Result<ConflictChoice> {
    eprintln!("{}", message);
    for (index, choice) in ConflictChoice::ALL.iter().enumerate() {
        eprintln!("  {}) {}", index + 1, choice);
    }

    let mut line = String::new();
    loop {
        eprint!("Choice [1]: ");
        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| DaddyError::io(format!("Failed to read answer: {}", e), None))?;
        if read == 0 {
            return Ok(ConflictChoice::Abort);
        }
        match ConflictChoice::from_answer(&line) {
            Some(choice) => return Ok(choice),
            None => eprintln!("Error: '{}' is not one of 1, 2, 3.", line.trim()),
        }
    }
}
