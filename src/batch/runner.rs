//! Sequential batch check over a word list

use std::time::Instant;

use crate::domain::AvailabilityCheck;
use crate::error::Result;
use crate::types::{BatchProgress, BatchReport};

/// Runs every candidate through a checker, one request at a time
pub struct BatchRunner<C> {
    checker: C,
}

impl<C: AvailabilityCheck> BatchRunner<C> {
    pub fn new(checker: C) -> Self {
        Self { checker }
    }

    /// Check all candidates in order and collect the available ones.
    ///
    /// `on_progress` is called after every candidate. A fatal error returns
    /// immediately; per-domain errors are logged and the candidate skipped.
    pub async fn run<F>(&self, candidates: &[String], mut on_progress: F) -> Result<BatchReport>
    where
        F: FnMut(&BatchProgress),
    {
        let start = Instant::now();
        let total = candidates.len();
        let mut report = BatchReport::default();

        for (index, label) in candidates.iter().enumerate() {
            match self.checker.check(label).await {
                Ok(result) => {
                    if result.available {
                        report.available.push(result.output_line());
                    }
                    report.checked += 1;
                }
                Err(e) if e.is_fatal() => {
                    tracing::debug!(domain = %self.checker.domain_for(label), error = %e, "Aborting batch");
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("{}. Skipping.", e);
                    report.skipped += 1;
                }
            }

            on_progress(&BatchProgress {
                current: index + 1,
                total,
                elapsed: start.elapsed(),
            });
        }

        report.available.sort();

        tracing::info!(
            checked = report.checked,
            skipped = report.skipped,
            available = report.available.len(),
            duration_ms = %start.elapsed().as_millis(),
            "Batch completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DaddyError;
    use crate::types::AvailabilityResult;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Checker answering from a fixed table and recording the call order
    struct ScriptedChecker {
        answers: HashMap<&'static str, Result<AvailabilityResult>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedChecker {
        fn new(answers: Vec<(&'static str, Result<AvailabilityResult>)>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AvailabilityCheck for ScriptedChecker {
        async fn check(&self, label: &str) -> Result<AvailabilityResult> {
            self.calls.lock().push(label.to_string());
            self.answers
                .get(label)
                .cloned()
                .unwrap_or_else(|| Ok(AvailabilityResult::unavailable(self.domain_for(label))))
        }

        fn domain_for(&self, label: &str) -> String {
            format!("{}.com", label)
        }
    }

    fn available(domain: &str, price: f64) -> Result<AvailabilityResult> {
        Ok(AvailabilityResult {
            domain: domain.to_string(),
            available: true,
            currency: "USD".to_string(),
            price,
        })
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_collects_sorted_available_lines() {
        let checker = ScriptedChecker::new(vec![
            ("zeta", available("zeta.com", 12.0)),
            ("alpha", available("alpha.com", 9.99)),
        ]);
        let runner = BatchRunner::new(checker);

        let mut seen = Vec::new();
        let report = runner
            .run(&labels(&["zeta", "taken", "alpha"]), |p| seen.push((p.current, p.total)))
            .await
            .unwrap();

        assert_eq!(report.available, vec!["alpha.com : USD 9.99", "zeta.com : USD 12.00"]);
        assert_eq!(report.checked, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_soft_errors_are_skipped() {
        let checker = ScriptedChecker::new(vec![
            ("broken", Err(DaddyError::unexpected("broken.com", "bad gateway"))),
            ("foo", available("foo.com", 1.0)),
        ]);
        let runner = BatchRunner::new(checker);

        let report = runner.run(&labels(&["broken", "foo"]), |_| {}).await.unwrap();
        assert_eq!(report.available, vec!["foo.com : USD 1.00"]);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.checked, 1);
    }

    #[tokio::test]
    async fn test_fatal_error_stops_batch() {
        let checker = ScriptedChecker::new(vec![
            ("foo", available("foo.com", 1.0)),
            ("bar", Err(DaddyError::Unauthorized)),
        ]);
        let runner = BatchRunner::new(checker);

        let err = runner
            .run(&labels(&["foo", "bar", "baz"]), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, DaddyError::Unauthorized));
        assert_eq!(*runner.checker.calls.lock(), vec!["foo", "bar"]);
    }

    #[tokio::test]
    async fn test_empty_word_list() {
        let runner = BatchRunner::new(ScriptedChecker::new(Vec::new()));
        let report = runner.run(&[], |_| panic!("no progress expected")).await.unwrap();
        assert!(report.available.is_empty());
        assert_eq!(report.checked, 0);
    }
}
