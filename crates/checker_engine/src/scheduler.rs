use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use checker_core::{Entry, Failure, Outcome, Verdict};
use checker_logging::{checker_error, checker_info, checker_warn};
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{EngineError, EngineEvent, Prober, ProgressSink};

/// Runs one probe per entry with at most `max_workers` probes in flight.
///
/// Every probe is its own task gated by a semaphore permit, so a probe
/// keeps making progress while the driver loop is busy in the sink.
/// Outcomes are collected in completion order; callers must not rely on
/// that order.
pub struct Scheduler {
    prober: Arc<dyn Prober>,
    max_workers: usize,
}

impl Scheduler {
    /// `max_workers` is clamped to at least one.
    pub fn new(prober: Arc<dyn Prober>, max_workers: usize) -> Self {
        Self {
            prober,
            max_workers: max_workers.max(1),
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Probe every entry and return exactly one outcome per entry.
    ///
    /// A probe that panics still yields an unreachable outcome. The only
    /// error is cancellation through `cancel`, which aborts every probe
    /// task and discards the outcomes collected so far.
    ///
    /// Must be called within a tokio runtime.
    pub async fn run(
        &self,
        entries: Vec<Entry>,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Vec<Outcome>, EngineError> {
        let total = entries.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        checker_info!(
            "probing {} entries with up to {} workers",
            total,
            self.max_workers
        );
        sink.emit(EngineEvent::BatchStarted {
            total,
            max_workers: self.max_workers,
        });

        let slots = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();
        let mut running: HashMap<Id, Entry> = HashMap::with_capacity(total);
        for entry in entries {
            let task = probe_task(Arc::clone(&self.prober), Arc::clone(&slots), entry.clone());
            let id = tasks.spawn(task).id();
            running.insert(id, entry);
        }

        let mut outcomes = Vec::with_capacity(total);
        loop {
            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    checker_warn!(
                        "cancelled with {} of {} probes completed",
                        outcomes.len(),
                        total
                    );
                    tasks.abort_all();
                    return Err(EngineError::Cancelled {
                        completed: outcomes.len(),
                        total,
                    });
                }
                joined = tasks.join_next_with_id() => joined,
            };
            let Some(joined) = joined else {
                break;
            };
            let outcome = match joined {
                Ok((id, outcome)) => {
                    running.remove(&id);
                    outcome
                }
                Err(err) => match running.remove(&err.id()) {
                    Some(entry) => faulted(entry, err),
                    None => {
                        checker_error!("result for unknown probe task {}: {}", err.id(), err);
                        continue;
                    }
                },
            };
            sink.emit(EngineEvent::ProbeCompleted {
                completed: outcomes.len() + 1,
                total,
                outcome: outcome.clone(),
            });
            outcomes.push(outcome);
        }

        debug_assert_eq!(outcomes.len(), total);
        let elapsed = started.elapsed();
        checker_info!("probed {} entries in {:?}", total, elapsed);
        sink.emit(EngineEvent::BatchFinished { total, elapsed });
        Ok(outcomes)
    }
}

async fn probe_task(prober: Arc<dyn Prober>, slots: Arc<Semaphore>, entry: Entry) -> Outcome {
    // The semaphore is never closed, so acquiring only waits for a free slot.
    let Ok(_permit) = slots.acquire().await else {
        return Outcome::new(
            entry,
            Verdict::Unreachable(Failure::Internal("worker slots closed".to_string())),
        );
    };
    let verdict = prober.probe(&entry).await;
    Outcome::new(entry, verdict)
}

/// Outcome for a probe task that panicked or was aborted.
fn faulted(entry: Entry, err: JoinError) -> Outcome {
    let cause = if err.is_panic() {
        panic_cause(err.into_panic().as_ref())
    } else {
        "probe task aborted".to_string()
    };
    checker_error!("probe for {} failed: {}", entry, cause);
    Outcome::new(entry, Verdict::Unreachable(Failure::Internal(cause)))
}

fn panic_cause(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
