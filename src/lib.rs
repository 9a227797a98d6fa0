//! daddy - bulk domain name availability checks at godaddy.com
//!
//! Reads candidate names from a TXT file, checks each one against the
//! registrar API and stores the available ones together with their price.

pub mod batch;
pub mod cli;
pub mod credentials;
pub mod display;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{DaddyError, Result};
pub use types::{
    AvailabilityResult, BatchProgress, BatchReport, ConflictChoice, Credentials, OutputMode,
    RunConfig,
};

// Re-export main functionality
pub use batch::{check_and_write, BatchRunner, WriteOutcome};
pub use domain::{AvailabilityCheck, DomainChecker};
