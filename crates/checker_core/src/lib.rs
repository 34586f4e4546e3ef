//! Checker core: playlist entries, probe outcomes and report rendering.
//!
//! Nothing in here touches the network; the engine crate produces
//! [`Outcome`]s and this crate turns them into reports.
mod entry;
mod outcome;
mod parse;
mod render;
mod report;

pub use entry::Entry;
pub use outcome::{Failure, Outcome, OutcomeKind, ResponseInfo, Verdict};
pub use parse::{parse_playlist, read_playlist, InputError, PlaylistParser, GENRE_MARKER};
pub use render::{render_clean_playlist, render_report};
pub use report::{Report, ReportError, Summary};
