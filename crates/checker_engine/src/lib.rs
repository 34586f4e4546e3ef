//! Checker engine: HTTP probing, bounded-concurrency scheduling and output IO.
mod engine;
mod persist;
mod probe;
mod scheduler;
mod types;

pub use engine::CheckEngine;
pub use persist::{ensure_output_dir, write_atomically, PersistError};
pub use probe::{classify_response, ProbeSettings, Prober, ReqwestProber, DEFAULT_USER_AGENT};
pub use scheduler::Scheduler;
pub use tokio_util::sync::CancellationToken;
pub use types::{ChannelProgressSink, EngineError, EngineEvent, ProgressSink};
