use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

pub(crate) const OUT_DIR_ENV: &str = "BIN_TO_WHEEL_OUT_DIR";
pub(crate) const SOURCE_DATE_EPOCH_ENV: &str = "SOURCE_DATE_EPOCH";
const DEFAULT_OUT_DIR: &str = "dist";

#[derive(Debug, Clone)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) output: OutputConfig,
    pub(crate) archive: ArchiveConfig,
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub(crate) default_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveConfig {
    /// Unix timestamp stamped on every archive entry, when set.
    pub(crate) source_date_epoch: Option<i64>,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_snapshot(&EnvSnapshot::capture())
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        let default_dir = snapshot
            .var(OUT_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);
        let source_date_epoch = snapshot
            .var(SOURCE_DATE_EPOCH_ENV)
            .and_then(parse_source_date_epoch);
        Self {
            output: OutputConfig { default_dir },
            archive: ArchiveConfig { source_date_epoch },
        }
    }

    #[must_use]
    pub fn default_output_dir(&self) -> &Path {
        &self.output.default_dir
    }

    #[must_use]
    pub fn archive(&self) -> ArchiveConfig {
        self.archive
    }
}

impl ArchiveConfig {
    #[must_use]
    pub fn with_source_date_epoch(epoch: i64) -> Self {
        Self {
            source_date_epoch: Some(epoch),
        }
    }

    #[must_use]
    pub fn source_date_epoch(&self) -> Option<i64> {
        self.source_date_epoch
    }
}

fn parse_source_date_epoch(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(epoch) => Some(epoch),
        Err(err) => {
            warn!(value = raw, %err, "ignoring unparseable {SOURCE_DATE_EPOCH_ENV}");
            None
        }
    }
}
