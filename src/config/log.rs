//! Log configuration (JSON side)

use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::app::{LogLevel, LogSettings, LogTarget};

/// `log`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Log level: debug, info, warning, error, none
    #[serde(rename = "loglevel", default)]
    pub level: String,

    /// Access log file path; "" for console, "none" to disable
    #[serde(default)]
    pub access: String,

    /// Error log file path; "" for console, "none" to disable
    #[serde(default)]
    pub error: String,

    #[serde(default)]
    pub dns_log: bool,
}

impl LogConfig {
    pub fn build(&self) -> LogSettings {
        let level = match self.level.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warning" | "" => LogLevel::Warning,
            "error" => LogLevel::Error,
            "none" => LogLevel::None,
            other => {
                warn!("Unknown log level {:?}, using warning", other);
                LogLevel::Warning
            }
        };

        let error = if level == LogLevel::None {
            LogTarget::None
        } else {
            log_target(&self.error)
        };

        LogSettings {
            access: log_target(&self.access),
            error,
            level,
            dns_log: self.dns_log,
        }
    }
}

fn log_target(path: &str) -> LogTarget {
    match path {
        "" => LogTarget::Console,
        "none" => LogTarget::None,
        path => LogTarget::File(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_defaults() {
        let settings = LogConfig::default().build();
        assert_eq!(settings.access, LogTarget::Console);
        assert_eq!(settings.error, LogTarget::Console);
        assert_eq!(settings.level, LogLevel::Warning);
    }

    #[test]
    fn test_targets_and_level() {
        let config: LogConfig = serde_json::from_str(
            r#"{"loglevel": "Debug", "access": "none", "error": "/var/log/err.log", "dnsLog": true}"#,
        )
        .unwrap();
        let settings = config.build();
        assert_eq!(settings.level, LogLevel::Debug);
        assert_eq!(settings.access, LogTarget::None);
        assert_eq!(
            settings.error,
            LogTarget::File(PathBuf::from("/var/log/err.log"))
        );
        assert!(settings.dns_log);
    }

    #[test]
    fn test_level_none_disables_error_log() {
        let config = LogConfig {
            level: "none".into(),
            ..Default::default()
        };
        let settings = config.build();
        assert_eq!(settings.error, LogTarget::None);
        assert_eq!(settings.access, LogTarget::Console);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let config = LogConfig {
            level: "verbose".into(),
            ..Default::default()
        };
        assert_eq!(config.build().level, LogLevel::Warning);
    }
}
