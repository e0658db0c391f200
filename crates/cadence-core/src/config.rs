use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_UPCOMING_LIMIT: usize = 5;
pub const ENV_PREFIX: &str = "CADENCE_";

/// Top-level config (cadence.toml + CADENCE_* env overrides).
///
/// Nested keys use a double underscore in the environment, e.g.
/// `CADENCE_DATABASE__PATH=/tmp/posts.db`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Set to false to never emit ANSI colours, even on a terminal.
    #[serde(default = "bool_true")]
    pub color: bool,
    /// How many upcoming posts the dashboard shows.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

fn bool_true() -> bool {
    true
}
fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.cadence/cadence.db", home)
}

impl CadenceConfig {
    /// Load config from a TOML file with CADENCE_* env var overrides.
    ///
    /// Uses `config_path` when given, otherwise `~/.cadence/cadence.toml`.
    /// A missing file is fine; every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);
        debug!(%path, "loading config");

        let config: CadenceConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| crate::error::CadenceError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.cadence/cadence.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = CadenceConfig::load(Some("does-not-exist.toml"))
                .map_err(|e| e.to_string())?;
            assert!(config.database.path.ends_with(".cadence/cadence.db"));
            assert!(config.display.color);
            assert_eq!(config.display.upcoming_limit, DEFAULT_UPCOMING_LIMIT);
            Ok(())
        });
    }

    #[test]
    fn file_values_are_read() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "cadence.toml",
                r#"
                [database]
                path = "/tmp/ledger.db"

                [display]
                color = false
                "#,
            )?;
            let config = CadenceConfig::load(Some("cadence.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.database.path, "/tmp/ledger.db");
            assert!(!config.display.color);
            assert_eq!(config.display.upcoming_limit, DEFAULT_UPCOMING_LIMIT);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("cadence.toml", "[database]\npath = \"/tmp/file.db\"\n")?;
            jail.set_env("CADENCE_DATABASE__PATH", "/tmp/env.db");
            jail.set_env("CADENCE_DISPLAY__UPCOMING_LIMIT", "3");
            let config = CadenceConfig::load(Some("cadence.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.database.path, "/tmp/env.db");
            assert_eq!(config.display.upcoming_limit, 3);
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("cadence.toml", "[display]\nupcoming_limit = \"many\"\n")?;
            let err = CadenceConfig::load(Some("cadence.toml")).unwrap_err();
            assert!(matches!(err, crate::error::CadenceError::Config(_)));
            Ok(())
        });
    }
}
