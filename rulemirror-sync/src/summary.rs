//! Aggregate view of a synchronize run.

use std::fmt;

use serde::Serialize;

use rulemirror_core::{RuleFilePath, SaveOutcome};

/// Success/failure tally plus the failure messages, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SyncSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<(RuleFilePath, String)>,
}

impl SyncSummary {
    pub fn from_outcomes(outcomes: &[SaveOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            if outcome.success {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
                let message = outcome
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string());
                summary.failures.push((outcome.path.clone(), message));
            }
        }
        summary
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} succeeded, {} failed", self.succeeded, self.failed)
    }
}
