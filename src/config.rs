// Configuration file handling

use crate::transport::{LockMode, PIPE_WRITER_FD, ReporterLock};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pipe: PipeConfig,

    #[serde(default)]
    pub file: FileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeConfig {
    /// Inherited descriptor to write frames to
    #[serde(default = "default_fd")]
    pub fd: i32,

    /// Lock file shared by every reporter writing to the same pipe
    #[serde(default = "default_lock_path")]
    pub lock_path: PathBuf,

    /// Wait for or fail on a contended lock
    #[serde(default)]
    pub lock_mode: LockMode,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            fd: default_fd(),
            lock_path: default_lock_path(),
            lock_mode: LockMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Report destination; selects file mode when set
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

pub const ENV_REPORTER_LOCK: &str = "TESTSOLAR_REPORTER_LOCK";
pub const ENV_FILE_REPORT_PATH: &str = "TESTSOLAR_FILE_REPORT_PATH";

pub const CONFIG_FILE_NAME: &str = ".testsolarrc.toml";

pub fn default_fd() -> i32 {
    PIPE_WRITER_FD
}

pub fn default_lock_path() -> PathBuf {
    ReporterLock::default_path()
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .testsolarrc.toml (current directory)
        // 2. ~/.testsolarrc.toml (home directory)

        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
        }

        paths
            .iter()
            .find(|path| path.exists())
            .and_then(|path| Self::load_from_file(path))
    }

    /// Configuration file if present, defaults otherwise, then environment overrides
    pub fn resolve() -> Self {
        Self::load().unwrap_or_default().with_env_overrides()
    }

    /// Load configuration from a specific file
    ///
    /// An unreadable or malformed file is logged and treated as absent.
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Apply `TESTSOLAR_*` environment variables
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(lock_path) = lookup(ENV_REPORTER_LOCK).filter(|v| !v.is_empty()) {
            self.pipe.lock_path = PathBuf::from(lock_path);
        }
        if let Some(report_path) = lookup(ENV_FILE_REPORT_PATH).filter(|v| !v.is_empty()) {
            self.file.report_path = Some(PathBuf::from(report_path));
        }
        self
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[pipe]
fd = 5
lock_path = "/run/testsolar/reporter.lock"
lock_mode = "non_blocking"

[file]
report_path = "/data/report"
"#;

        let config = Config::parse(toml).expect("Failed to parse config");
        assert_eq!(config.pipe.fd, 5);
        assert_eq!(
            config.pipe.lock_path,
            PathBuf::from("/run/testsolar/reporter.lock")
        );
        assert_eq!(config.pipe.lock_mode, LockMode::NonBlocking);
        assert_eq!(config.file.report_path, Some(PathBuf::from("/data/report")));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse("[pipe]\nfd = 4\n").expect("Failed to parse config");
        assert_eq!(config.pipe.fd, 4);
        assert_eq!(config.pipe.lock_path, default_lock_path());
        assert_eq!(config.pipe.lock_mode, LockMode::Blocking);
        assert!(config.file.report_path.is_none());
    }

    #[test]
    fn test_invalid_lock_mode_rejected() {
        assert!(Config::parse("[pipe]\nlock_mode = \"sometimes\"\n").is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_overrides(|key| match key {
            ENV_REPORTER_LOCK => Some("/tmp/other.lock".to_string()),
            ENV_FILE_REPORT_PATH => Some("/tmp/reports".to_string()),
            _ => None,
        });

        assert_eq!(config.pipe.lock_path, PathBuf::from("/tmp/other.lock"));
        assert_eq!(config.file.report_path, Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let config = Config::default().with_overrides(|_| Some(String::new()));
        assert_eq!(config.pipe.lock_path, default_lock_path());
        assert!(config.file.report_path.is_none());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = Config::default();
        config.file.report_path = Some(PathBuf::from("/data/report/result.json"));

        let parsed = Config::parse(&config.to_toml()).expect("Failed to parse generated config");
        assert_eq!(parsed.pipe.fd, config.pipe.fd);
        assert_eq!(parsed.file.report_path, config.file.report_path);
    }
}
