use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Check which streams in a playlist are alive and write a cleaned copy.
#[derive(Debug, Parser)]
#[command(name = "playlist-checker", version)]
#[command(about = "Check the liveness of streams listed in a playlist", long_about = None)]
pub struct Cli {
    /// Playlist to check (default: IPTV.txt).
    pub input: Option<PathBuf>,

    /// RON file with default settings; command-line flags take precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shorter timeout and more workers (5s, 30 workers).
    #[arg(long)]
    pub quick: bool,

    /// Per-probe network timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of probes in flight.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// User-Agent header sent with each probe.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Treat redirects as final responses instead of following them.
    #[arg(long)]
    pub no_follow_redirects: bool,

    /// Where to write the validation report.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Where to write the cleaned playlist.
    #[arg(long, value_name = "FILE")]
    pub clean: Option<PathBuf>,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
