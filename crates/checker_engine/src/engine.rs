use std::sync::Arc;

use checker_core::{Entry, Outcome};
use checker_logging::checker_warn;
use tokio_util::sync::CancellationToken;

use crate::{EngineError, ProbeSettings, Prober, ProgressSink, ReqwestProber, Scheduler};

/// Owns the async runtime for one batch and wires Ctrl-C to cancellation.
pub struct CheckEngine {
    scheduler: Scheduler,
    cancel: CancellationToken,
}

impl CheckEngine {
    pub fn new(settings: ProbeSettings, max_workers: usize) -> Result<Self, EngineError> {
        let prober = ReqwestProber::new(settings)?;
        Ok(Self::with_prober(Arc::new(prober), max_workers))
    }

    pub fn with_prober(prober: Arc<dyn Prober>, max_workers: usize) -> Self {
        Self {
            scheduler: Scheduler::new(prober, max_workers),
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts a running batch when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Probe `entries` on a fresh multi-threaded runtime, blocking the
    /// calling thread until every outcome is in or the batch is cancelled.
    ///
    /// Ctrl-C cancels the batch only while this call is running. The first
    /// call replaces the default SIGINT action for the rest of the process,
    /// so an interrupt arriving after it returns is ignored. Callers that
    /// keep working afterwards should keep that work short.
    ///
    /// Must not be called from inside an async context.
    pub fn run(
        &self,
        entries: Vec<Entry>,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<Outcome>, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        runtime.spawn(cancel_on_interrupt(self.cancel.clone()));
        runtime.block_on(self.scheduler.run(entries, sink, &self.cancel))
    }
}

async fn cancel_on_interrupt(cancel: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                checker_warn!("interrupt received, aborting in-flight probes");
                cancel.cancel();
            }
        }
        _ = cancel.cancelled() => {}
    }
}
