use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use checker_engine::{ProbeSettings, DEFAULT_USER_AGENT};
use checker_logging::checker_info;
use ron::extensions::Extensions;
use serde::Deserialize;

use crate::cli::Cli;

const DEFAULT_INPUT: &str = "IPTV.txt";
const REPORT_PREFIX: &str = "iptv_validation_report";
const CLEAN_PREFIX: &str = "IPTV_clean";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub timeout_seconds: u64,
    pub max_workers: usize,
    pub user_agent: String,
    pub follow_redirects: bool,
    pub redirect_limit: usize,
    pub input_path: PathBuf,
    /// `None` means a timestamped name in the working directory.
    pub report_output_path: Option<PathBuf>,
    pub clean_output_path: Option<PathBuf>,
}

impl CheckerConfig {
    pub fn standard() -> Self {
        Self {
            timeout_seconds: 10,
            max_workers: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            redirect_limit: 10,
            input_path: PathBuf::from(DEFAULT_INPUT),
            report_output_path: None,
            clean_output_path: None,
        }
    }

    pub fn quick() -> Self {
        Self {
            timeout_seconds: 5,
            max_workers: 30,
            ..Self::standard()
        }
    }

    fn apply_file(&mut self, file: ConfigFile) {
        let ConfigFile {
            timeout_seconds,
            max_workers,
            user_agent,
            follow_redirects,
            redirect_limit,
            input_path,
            report_output_path,
            clean_output_path,
        } = file;
        if let Some(value) = timeout_seconds {
            self.timeout_seconds = value;
        }
        if let Some(value) = max_workers {
            self.max_workers = value;
        }
        if let Some(value) = user_agent {
            self.user_agent = value;
        }
        if let Some(value) = follow_redirects {
            self.follow_redirects = value;
        }
        if let Some(value) = redirect_limit {
            self.redirect_limit = value;
        }
        if let Some(value) = input_path {
            self.input_path = value;
        }
        if report_output_path.is_some() {
            self.report_output_path = report_output_path;
        }
        if clean_output_path.is_some() {
            self.clean_output_path = clean_output_path;
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(value) = cli.timeout {
            self.timeout_seconds = value;
        }
        if let Some(value) = cli.workers {
            self.max_workers = value;
        }
        if let Some(value) = &cli.user_agent {
            self.user_agent = value.clone();
        }
        if cli.no_follow_redirects {
            self.follow_redirects = false;
        }
        if let Some(value) = &cli.input {
            self.input_path = value.clone();
        }
        if cli.report.is_some() {
            self.report_output_path = cli.report.clone();
        }
        if cli.clean.is_some() {
            self.clean_output_path = cli.clean.clone();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            bail!("timeout_seconds must be at least 1");
        }
        if self.max_workers == 0 {
            bail!("max_workers must be at least 1");
        }
        Ok(())
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
            follow_redirects: self.follow_redirects,
            redirect_limit: self.redirect_limit,
        }
    }

    /// `stamp` is local time as `YYYYmmdd_HHMMSS`.
    pub fn report_path(&self, stamp: &str) -> PathBuf {
        self.report_output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{REPORT_PREFIX}_{stamp}.txt")))
    }

    pub fn clean_path(&self, stamp: &str) -> PathBuf {
        self.clean_output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{CLEAN_PREFIX}_{stamp}.txt")))
    }
}

/// On-disk settings. Every field is optional; missing ones keep the profile
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub timeout_seconds: Option<u64>,
    pub max_workers: Option<usize>,
    pub user_agent: Option<String>,
    pub follow_redirects: Option<bool>,
    pub redirect_limit: Option<usize>,
    pub input_path: Option<PathBuf>,
    pub report_output_path: Option<PathBuf>,
    pub clean_output_path: Option<PathBuf>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(text)
            .context("invalid config syntax")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path:?}"))?;
        let file = Self::parse(&text).with_context(|| format!("in config file {path:?}"))?;
        checker_info!("loaded config from {:?}", path);
        Ok(file)
    }
}

/// Profile defaults, then the config file, then command-line flags.
pub fn resolve(cli: &Cli) -> Result<CheckerConfig> {
    let mut config = if cli.quick {
        CheckerConfig::quick()
    } else {
        CheckerConfig::standard()
    };
    if let Some(path) = &cli.config {
        config.apply_file(ConfigFile::load(path)?);
    }
    config.apply_cli(cli);
    config.validate()?;
    Ok(config)
}
