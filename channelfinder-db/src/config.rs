use crate::error::{DbError, DbResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path value that selects an in-memory catalog.
pub const MEMORY_PATH: &str = ":memory:";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// How to open a catalog database.
///
/// Every field except `path` has a default, so a minimal JSON config is
/// `{"path": "channels.db"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    /// Database file, or `":memory:"`.
    pub path: PathBuf,
    /// Open without write access. Searches never write. Ignored for
    /// in-memory catalogs.
    #[serde(default = "default_read_only")]
    pub read_only: bool,
    /// How long to wait on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_read_only() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl DbConfig {
    /// Read-only config for the catalog at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: default_read_only(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Config for a fresh in-memory catalog (always writable).
    pub fn in_memory() -> Self {
        Self {
            read_only: false,
            ..Self::new(MEMORY_PATH)
        }
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY_PATH
    }

    pub fn busy_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Parses a JSON config document.
    pub fn from_json_str(json: &str) -> DbResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON config file.
    pub fn from_json_file(path: &Path) -> DbResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> DbResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(DbError::Config("catalog path is empty".into()));
        }
        Ok(())
    }
}
