//! Core types and structures for daddy

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Production endpoint of the registrar API
pub const DEFAULT_API_URL: &str = "https://api.godaddy.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default top level domain
pub const DEFAULT_TLD: &str = "com";

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "available.txt";

/// API key and secret for godaddy.com
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("sso-key {}:{}", self.key, self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

/// Availability of a single domain as reported by the registrar
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityResult {
    pub domain: String,
    pub available: bool,
    pub currency: String,
    /// Price in currency units (the API reports micro-units)
    pub price: f64,
}

impl AvailabilityResult {
    /// Result for a domain the registrar refused to price, e.g. a malformed name
    pub fn unavailable(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            available: false,
            currency: "USD".to_string(),
            price: 0.0,
        }
    }

    /// Line written to the output file
    pub fn output_line(&self) -> String {
        format!("{} : {} {:.2}", self.domain, self.currency, self.price)
    }
}

/// How the output file is opened once the batch finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The output file did not exist before the run
    #[default]
    Create,
    Overwrite,
    Append,
}

/// Answer to the "output file already exists" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Abort,
    Overwrite,
    Append,
}

impl ConflictChoice {
    pub const ALL: [ConflictChoice; 3] = [
        ConflictChoice::Abort,
        ConflictChoice::Overwrite,
        ConflictChoice::Append,
    ];

    /// Parse a numbered answer; an empty answer means abort
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim() {
            "" | "1" => Some(ConflictChoice::Abort),
            "2" => Some(ConflictChoice::Overwrite),
            "3" => Some(ConflictChoice::Append),
            _ => None,
        }
    }

    /// Output mode for this choice, `None` when the run should stop
    pub fn output_mode(self) -> Option<OutputMode> {
        match self {
            ConflictChoice::Abort => None,
            ConflictChoice::Overwrite => Some(OutputMode::Overwrite),
            ConflictChoice::Append => Some(OutputMode::Append),
        }
    }
}

impl fmt::Display for ConflictChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictChoice::Abort => write!(f, "Abort"),
            ConflictChoice::Overwrite => write!(f, "Overwrite existing file"),
            ConflictChoice::Append => write!(f, "Append to existing file"),
        }
    }
}

/// Immutable configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// TLD without leading dot, lower-cased
    pub tld: String,
    pub credentials: Credentials,
    pub api_base_url: String,
    pub timeout: Duration,
    /// Give up on a domain after this many consecutive rate-limit responses.
    /// `None` keeps retrying for as long as the API asks.
    pub max_rate_limit_retries: Option<u32>,
}

impl RunConfig {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        tld: &str,
        credentials: Credentials,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            tld: normalize_tld(tld),
            credentials,
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_rate_limit_retries: None,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_rate_limit_retries(mut self, retries: Option<u32>) -> Self {
        self.max_rate_limit_retries = retries;
        self
    }
}

/// Strip a leading dot and lower-case the TLD
pub fn normalize_tld(tld: &str) -> String {
    tld.trim().trim_start_matches('.').to_lowercase()
}

/// Progress of the batch after each checked candidate
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
    pub elapsed: Duration,
}

/// Outcome of a completed batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub checked: usize,
    pub skipped: usize,
    /// Sorted output lines of available domains
    pub available: Vec<String>,
}
