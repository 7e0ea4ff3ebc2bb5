use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = ".data/abook.db";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime settings, read from the environment (and `.env`) and then
/// overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub telemetry: TelemetryConfig,
}

/// Logging controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. `ABOOK_DB` and
    /// `ABOOK_LOG_LEVEL` are read; blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            db_path: read("ABOOK_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            telemetry: TelemetryConfig {
                log_level: read("ABOOK_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_missing() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ABOOK_DB", "/tmp/book.db"),
            ("ABOOK_LOG_LEVEL", "abook=debug"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/book.db"));
        assert_eq!(config.telemetry.log_level, "abook=debug");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[("ABOOK_DB", "  ")]));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }
}
