use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use checker_core::OutcomeKind;
use checker_engine::EngineEvent;

/// Prints one line per engine event on a dedicated thread, so a slow
/// terminal never stalls probing.
pub struct ProgressPrinter {
    handle: JoinHandle<()>,
}

impl ProgressPrinter {
    /// The thread exits once every sender of `events` is dropped.
    pub fn spawn(events: mpsc::Receiver<EngineEvent>) -> Self {
        let handle = thread::spawn(move || {
            while let Ok(event) = events.recv() {
                println!("{}", progress_line(&event));
            }
        });
        Self { handle }
    }

    pub fn join(self) {
        let _ = self.handle.join();
    }
}

fn progress_line(event: &EngineEvent) -> String {
    match event {
        EngineEvent::BatchStarted { total, max_workers } => {
            format!("Checking {total} channels with up to {max_workers} workers...")
        }
        EngineEvent::ProbeCompleted {
            completed,
            total,
            outcome,
        } => {
            let name = &outcome.entry.name;
            let detail = outcome.detail().unwrap_or_default();
            match outcome.kind() {
                OutcomeKind::Reachable => format!("[{completed}/{total}] ✅ {name}"),
                OutcomeKind::Suspicious => format!("[{completed}/{total}] ⚠️  {name} - {detail}"),
                OutcomeKind::Unreachable => format!("[{completed}/{total}] ❌ {name} - {detail}"),
            }
        }
        EngineEvent::BatchFinished { total, elapsed } => {
            format!("Checked {total} channels in {:.1}s", elapsed.as_secs_f64())
        }
    }
}
