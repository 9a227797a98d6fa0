//! Domain availability checking module

pub mod checker;
pub mod words;

// Re-export main functionality
pub use checker::DomainChecker;
pub use words::load_candidates;

use crate::error::Result;
use crate::types::AvailabilityResult;
use async_trait::async_trait;

/// Trait for anything that can tell whether a candidate label is available
#[async_trait]
pub trait AvailabilityCheck: Send + Sync {
    /// Check one candidate label.
    ///
    /// Fatal errors (see [`crate::DaddyError::is_fatal`]) stop the batch,
    /// anything else only skips this label.
    async fn check(&self, label: &str) -> Result<AvailabilityResult>;

    /// Fully qualified domain the label is checked as
    fn domain_for(&self, label: &str) -> String;
}
