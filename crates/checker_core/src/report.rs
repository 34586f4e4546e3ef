use std::collections::HashSet;

use thiserror::Error;

use crate::{Outcome, OutcomeKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("expected {expected} outcomes, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("line {0} has more than one outcome")]
    DuplicateLine(usize),
}

/// Counts per outcome kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub reachable: usize,
    pub suspicious: usize,
    pub unreachable: usize,
}

impl Summary {
    pub fn count(&self, kind: OutcomeKind) -> usize {
        match kind {
            OutcomeKind::Reachable => self.reachable,
            OutcomeKind::Suspicious => self.suspicious,
            OutcomeKind::Unreachable => self.unreachable,
        }
    }

    /// Share of `kind` in percent. Zero when there is nothing to count.
    pub fn percent(&self, kind: OutcomeKind) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(kind) as f64 / self.total as f64 * 100.0
    }
}

/// The complete outcome set, partitioned by kind and ordered by source line.
///
/// Completion order never leaks in here: each partition is sorted by
/// `entry.line_number` so two runs over the same results render identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    summary: Summary,
    unreachable: Vec<Outcome>,
    suspicious: Vec<Outcome>,
    reachable: Vec<Outcome>,
}

impl Report {
    /// Aggregate `outcomes`, which must hold exactly one outcome for each of
    /// the `expected` entries that were submitted.
    pub fn build(expected: usize, outcomes: Vec<Outcome>) -> Result<Self, ReportError> {
        if outcomes.len() != expected {
            return Err(ReportError::CountMismatch {
                expected,
                actual: outcomes.len(),
            });
        }
        let mut seen = HashSet::with_capacity(outcomes.len());
        for outcome in &outcomes {
            if !seen.insert(outcome.entry.line_number) {
                return Err(ReportError::DuplicateLine(outcome.entry.line_number));
            }
        }

        let mut report = Self {
            summary: Summary {
                total: outcomes.len(),
                ..Summary::default()
            },
            unreachable: Vec::new(),
            suspicious: Vec::new(),
            reachable: Vec::new(),
        };
        for outcome in outcomes {
            match outcome.kind() {
                OutcomeKind::Reachable => {
                    report.summary.reachable += 1;
                    report.reachable.push(outcome);
                }
                OutcomeKind::Suspicious => {
                    report.summary.suspicious += 1;
                    report.suspicious.push(outcome);
                }
                OutcomeKind::Unreachable => {
                    report.summary.unreachable += 1;
                    report.unreachable.push(outcome);
                }
            }
        }
        for partition in [
            &mut report.unreachable,
            &mut report.suspicious,
            &mut report.reachable,
        ] {
            partition.sort_by_key(|outcome| outcome.entry.line_number);
        }
        Ok(report)
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn outcomes(&self, kind: OutcomeKind) -> &[Outcome] {
        match kind {
            OutcomeKind::Reachable => &self.reachable,
            OutcomeKind::Suspicious => &self.suspicious,
            OutcomeKind::Unreachable => &self.unreachable,
        }
    }

    pub fn unreachable(&self) -> &[Outcome] {
        &self.unreachable
    }

    pub fn suspicious(&self) -> &[Outcome] {
        &self.suspicious
    }

    pub fn reachable(&self) -> &[Outcome] {
        &self.reachable
    }
}
