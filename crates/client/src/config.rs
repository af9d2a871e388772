//! Driver configuration read from the environment.
use std::env;
use std::path::PathBuf;

use crate::plan::Plan;

/// Settings of one headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub plan: Plan,
    /// Simulated seconds to run in total.
    pub seconds: u64,
    /// Sleep one wall-clock second per simulated second.
    pub realtime: bool,
    /// Directory of the log file; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
    /// Events included in the printed summary.
    pub summary_events: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            plan: Plan::default(),
            seconds: Self::DEFAULT_SECONDS,
            realtime: false,
            log_dir: None,
            summary_events: Self::DEFAULT_SUMMARY_EVENTS,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_SECONDS: u64 = 3_600;
    pub const DEFAULT_SUMMARY_EVENTS: usize = 20;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `OPS_PLAN` - Steps separated by `;` (default: train for the whole run)
    /// - `OPS_SECONDS` - Simulated seconds to run (default: 3600)
    /// - `OPS_REALTIME` - Pace the run with the wall clock (default: false)
    /// - `OPS_LOG_DIR` - Also log to `opsim.log` there; empty picks the cache dir
    /// - `OPS_SUMMARY_EVENTS` - Recent events printed in the summary (default: 20)
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(plan) = env::var("OPS_PLAN") {
            config.plan = plan.parse()?;
        }
        if let Some(seconds) = read_env::<u64>("OPS_SECONDS") {
            config.seconds = seconds;
        }
        if let Some(realtime) = read_env::<bool>("OPS_REALTIME") {
            config.realtime = realtime;
        } else if env::var("OPS_REALTIME").is_ok() {
            config.realtime = true;
        }
        config.log_dir = env::var("OPS_LOG_DIR").ok().map(|dir| {
            if dir.trim().is_empty() {
                default_log_dir()
            } else {
                PathBuf::from(dir)
            }
        });
        if let Some(events) = read_env::<usize>("OPS_SUMMARY_EVENTS") {
            config.summary_events = events;
        }

        Ok(config)
    }
}

/// Platform cache directory for logs, e.g. `~/.cache/opsim/logs` on Linux.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "opsim")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join("opsim"))
        .join("logs")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
