//! Batch checking of a word list and writing of the results

mod output;
mod runner;

pub use output::{output_conflict, write_available, WriteOutcome};
pub use runner::BatchRunner;

use crate::domain::AvailabilityCheck;
use crate::error::Result;
use crate::types::{BatchProgress, OutputMode, RunConfig};

/// Check every candidate and write the available ones to the configured output.
///
/// Nothing is written unless the whole batch completes.
pub async fn check_and_write<C, F>(
    checker: C,
    config: &RunConfig,
    candidates: &[String],
    mode: OutputMode,
    on_progress: F,
) -> Result<WriteOutcome>
where
    C: AvailabilityCheck,
    F: FnMut(&BatchProgress),
{
    let report = BatchRunner::new(checker).run(candidates, on_progress).await?;
    write_available(&config.output_path, &report.available, mode)
}
