//! Server configuration module
//!
//! Settings are layered: built-in defaults, then a YAML file, then `SUBS_*`
//! environment variables (`http.address` is overridden by `SUBS_HTTP_ADDRESS`).

use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, File};
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

pub(crate) mod http;
pub(crate) mod log;
pub(crate) mod postgres;

use crate::config::{http::HttpSettings, log::LogSettings, postgres::PostgresSettings};

const ENV_PREFIX: &str = "SUBS";

/// Files probed, in order, when no `--config` path is given.
const DEFAULT_FILES: [&str; 4] = [
    "config.yaml",
    "config.yml",
    "configs/config.yaml",
    "configs/config.yml",
];

/// Every recognised key, each overridable from the environment.
const KEYS: [&str; 9] = [
    "http.address",
    "http.read_timeout_seconds",
    "http.write_timeout_seconds",
    "http.idle_timeout_seconds",
    "postgres.dsn",
    "postgres.min_conns",
    "postgres.max_conns",
    "log.level",
    "log.format",
];

/// Subscriptions JSON API Server command line
#[derive(Debug, Parser)]
#[command(name = "subs-json", about = "Subscriptions JSON API Server", long_about = None)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "SUBS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("postgres.dsn is required")]
    MissingDsn,
}

/// Subscriptions JSON API Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP listener settings.
    pub http: HttpSettings,

    /// Database pool settings.
    pub postgres: PostgresSettings,

    /// Logging output settings.
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from `.env`, CLI arguments, the config file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if arguments cannot be parsed or the settings are invalid.
    pub fn load() -> Result<Self, SettingsError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        let cli = Cli::try_parse()?;
        let file = resolve_file(cli.config, |path| path.exists())?;

        Self::load_from(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Layer defaults, the optional `file` and the variables returned by `env`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or a value has the wrong type.
    pub fn load_from(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("http.address", ":8080")?
            .set_default("http.read_timeout_seconds", 10)?
            .set_default("http.write_timeout_seconds", 10)?
            .set_default("http.idle_timeout_seconds", 60)?
            .set_default("postgres.dsn", "")?
            .set_default("postgres.min_conns", 2)?
            .set_default("postgres.max_conns", 10)?
            .set_default("log.level", "info")?
            .set_default("log.format", "json")?;

        if let Some(file) = file {
            builder = builder.add_source(File::from(file).required(true));
        }

        for key in KEYS {
            builder = builder.set_override_option(key, env(&env_var_name(key)))?;
        }

        let settings: Self = builder.build()?.try_deserialize()?;

        if settings.postgres.dsn.trim().is_empty() {
            return Err(SettingsError::MissingDsn);
        }

        Ok(settings)
    }
}

/// Environment variable overriding `key`.
fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}_{}", key.replace('.', "_").to_ascii_uppercase())
}

/// Pick the explicit path, or the first default file that exists.
fn resolve_file(
    explicit: Option<PathBuf>,
    exists: impl Fn(&Path) -> bool,
) -> Result<Option<PathBuf>, SettingsError> {
    if let Some(path) = explicit {
        return if exists(path.as_path()) {
            Ok(Some(path))
        } else {
            Err(SettingsError::MissingFile(path))
        };
    }

    Ok(DEFAULT_FILES
        .iter()
        .map(PathBuf::from)
        .find(|path| exists(path.as_path())))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use crate::config::log::LogFormat;

    use super::*;

    fn no_env(_key: &str) -> Option<String> {
        None
    }

    fn yaml_file(contents: &str) -> TestResult<NamedTempFile> {
        let mut file = NamedTempFile::with_suffix(".yaml")?;

        file.write_all(contents.as_bytes())?;

        Ok(file)
    }

    #[test]
    fn env_var_names_use_prefix_and_underscores() {
        assert_eq!(env_var_name("postgres.dsn"), "SUBS_POSTGRES_DSN");
        assert_eq!(
            env_var_name("http.read_timeout_seconds"),
            "SUBS_HTTP_READ_TIMEOUT_SECONDS"
        );
    }

    #[test]
    fn defaults_apply_when_only_dsn_is_set() -> TestResult {
        let settings = Settings::load_from(None, |key| {
            (key == "SUBS_POSTGRES_DSN").then(|| "postgres://localhost/subs".to_string())
        })?;

        assert_eq!(settings.http.address, ":8080");
        assert_eq!(settings.http.read_timeout_seconds, 10);
        assert_eq!(settings.http.write_timeout_seconds, 10);
        assert_eq!(settings.http.idle_timeout_seconds, 60);
        assert_eq!(settings.postgres.min_conns, 2);
        assert_eq!(settings.postgres.max_conns, 10);
        assert_eq!(settings.log.level, "info");
        assert!(matches!(settings.log.format, LogFormat::Json));

        Ok(())
    }

    #[test]
    fn missing_dsn_is_rejected() {
        let result = Settings::load_from(None, no_env);

        assert!(
            matches!(result, Err(SettingsError::MissingDsn)),
            "expected MissingDsn, got {result:?}"
        );
    }

    #[test]
    fn yaml_file_overrides_defaults() -> TestResult {
        let file = yaml_file(
            r#"
http:
  address: "127.0.0.1:9000"
  write_timeout_seconds: 30
postgres:
  dsn: "postgres://subs:subs@db:5432/subs"
  max_conns: 25
log:
  level: debug
  format: compact
"#,
        )?;

        let settings = Settings::load_from(Some(file.path()), no_env)?;

        assert_eq!(settings.http.address, "127.0.0.1:9000");
        assert_eq!(settings.http.write_timeout_seconds, 30);
        assert_eq!(settings.http.read_timeout_seconds, 10);
        assert_eq!(settings.postgres.dsn, "postgres://subs:subs@db:5432/subs");
        assert_eq!(settings.postgres.max_conns, 25);
        assert_eq!(settings.log.level, "debug");
        assert!(matches!(settings.log.format, LogFormat::Compact));

        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> TestResult {
        let file = yaml_file(
            r#"
http:
  address: ":9000"
postgres:
  dsn: "postgres://file/subs"
"#,
        )?;

        let env = HashMap::from([
            ("SUBS_HTTP_ADDRESS", ":7000"),
            ("SUBS_POSTGRES_DSN", "postgres://env/subs"),
            ("SUBS_POSTGRES_MAX_CONNS", "42"),
        ]);

        let settings = Settings::load_from(Some(file.path()), |key| {
            env.get(key).map(ToString::to_string)
        })?;

        assert_eq!(settings.http.address, ":7000");
        assert_eq!(settings.postgres.dsn, "postgres://env/subs");
        assert_eq!(settings.postgres.max_conns, 42);

        Ok(())
    }

    #[test]
    fn mistyped_value_is_a_config_error() -> TestResult {
        let file = yaml_file(
            r#"
http:
  read_timeout_seconds: soon
postgres:
  dsn: "postgres://file/subs"
"#,
        )?;

        let result = Settings::load_from(Some(file.path()), no_env);

        assert!(
            matches!(result, Err(SettingsError::Config(_))),
            "expected Config error, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn explicit_file_must_exist() {
        let result = resolve_file(Some(PathBuf::from("missing.yaml")), |_| false);

        assert!(
            matches!(result, Err(SettingsError::MissingFile(ref path)) if path == Path::new("missing.yaml")),
            "expected MissingFile, got {result:?}"
        );
    }

    #[test]
    fn default_files_are_probed_in_order() -> TestResult {
        let found = resolve_file(None, |path| path.starts_with("configs"))?;

        assert_eq!(found, Some(PathBuf::from("configs/config.yaml")));

        Ok(())
    }

    #[test]
    fn no_file_is_fine() -> TestResult {
        assert_eq!(resolve_file(None, |_| false)?, None);

        Ok(())
    }
}
