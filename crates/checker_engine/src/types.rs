use std::io;
use std::sync::mpsc;
use std::time::Duration;

use checker_core::Outcome;
use thiserror::Error;

/// Notifications emitted while a batch is probed.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    BatchStarted {
        total: usize,
        max_workers: usize,
    },
    /// Emitted once per entry, in completion order.
    ProbeCompleted {
        completed: usize,
        total: usize,
        outcome: Outcome,
    },
    BatchFinished {
        total: usize,
        elapsed: Duration,
    },
}

/// Receives engine events. A slow `emit` only delays later events; probes
/// already running are unaffected.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Forwards events over an unbounded channel so a slow consumer never
/// holds up the scheduler.
pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("probing cancelled after {completed} of {total} entries")]
    Cancelled { completed: usize, total: usize },
}
