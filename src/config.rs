//! Configuration file support for hyperion.
//!
//! Provides YAML-based configuration through `hyperion.config.yml` files,
//! including data structures, file loading, validation and the merge with
//! command-line overrides.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::gmp::{GmpAddress, DEFAULT_MAX_RESPONSE_SIZE};
use crate::cli::{Args, LogLevel};
use crate::shared::error::HyperionError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "hyperion.config.yml";

const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
const DEFAULT_GMP_SOCKET: &str = "/run/gvmd/gvmd.sock";
const DEFAULT_GMP_TIMEOUT_SECS: u64 = 60;
const DEFAULT_COOKIE_NAME: &str = "hyperion_session";
const DEFAULT_COOKIE_AGE_SECS: i64 = 900;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub listen: Option<String>,
    pub log_level: Option<String>,
    pub playground: Option<bool>,
    #[serde(default)]
    pub gmp: GmpSection,
    #[serde(default)]
    pub session: SessionSection,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GmpSection {
    pub socket: Option<PathBuf>,
    pub address: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Upper bound for a single GMP response
    pub max_response_bytes: Option<usize>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SessionSection {
    pub cookie_name: Option<String>,
    pub cookie_age_secs: Option<i64>,
    pub backend: Option<SessionBackendKind>,
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackendKind {
    Memory,
    File,
}

/// Where sessions are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    File(PathBuf),
}

/// Effective settings after merging defaults, the config file and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub listen: SocketAddr,
    pub log_level: LogLevel,
    pub playground: bool,
    pub gmp_address: GmpAddress,
    pub gmp_timeout: Duration,
    pub gmp_max_response_bytes: usize,
    pub cookie_name: String,
    pub cookie_age_secs: i64,
    pub session_backend: SessionBackend,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;
    let size = std::fs::metadata(path)?.len();
    validate_file_size(size, path, MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn configuration_error(message: impl Into<String>, hint: impl Into<String>) -> anyhow::Error {
    HyperionError::Configuration {
        message: message.into(),
        hint: hint.into(),
    }
    .into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.gmp.socket.is_some() && config.gmp.address.is_some() {
        return Err(configuration_error(
            "gmp.socket and gmp.address are mutually exclusive",
            "Configure either the Unix socket or the TCP address of gvmd, not both.",
        ));
    }
    if config.gmp.timeout_secs == Some(0) {
        return Err(configuration_error(
            "gmp.timeout_secs must be greater than 0",
            "Use the number of seconds a single GMP read or write may take (e.g. 60).",
        ));
    }
    if config.gmp.max_response_bytes == Some(0) {
        return Err(configuration_error(
            "gmp.max_response_bytes must be greater than 0",
            "Use the largest GMP response in bytes hyperion should accept (e.g. 268435456).",
        ));
    }
    if matches!(config.session.cookie_age_secs, Some(age) if age <= 0) {
        return Err(configuration_error(
            "session.cookie_age_secs must be greater than 0",
            "Use the session lifetime in seconds (e.g. 900).",
        ));
    }
    if config.session.backend == Some(SessionBackendKind::File) && config.session.path.is_none() {
        return Err(configuration_error(
            "session.backend 'file' requires session.path",
            "Set session.path to a directory where session files can be stored.",
        ));
    }
    if let Some(listen) = &config.listen {
        parse_listen(listen)?;
    }
    if let Some(level) = &config.log_level {
        parse_log_level(level)?;
    }
    Ok(())
}

fn parse_listen(value: &str) -> Result<SocketAddr> {
    value.parse::<SocketAddr>().map_err(|_| {
        configuration_error(
            format!("'{}' is not a valid listen address", value),
            "Use an IP address and port such as 127.0.0.1:8080.",
        )
    })
}

fn parse_log_level(value: &str) -> Result<LogLevel> {
    value
        .parse::<LogLevel>()
        .map_err(|message| configuration_error(message, "Set log_level to trace, debug, info, warn or error."))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let sections = [
        ("", &config.unknown_fields),
        ("gmp.", &config.gmp.unknown_fields),
        ("session.", &config.session.unknown_fields),
    ];
    for (prefix, fields) in sections {
        for key in fields.keys() {
            eprintln!(
                "⚠️  Warning: Unknown config field '{}{}' will be ignored.",
                prefix, key
            );
        }
    }
}

impl Settings {
    /// Loads the config file named by `--config`, or the one in `dir` if
    /// present, and applies the CLI overrides.
    pub fn load(args: &Args, dir: &Path) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_config_from_path(path)?,
            None => discover_config(dir)?.unwrap_or_default(),
        };
        Self::resolve(file, args)
    }

    /// Merges defaults, file values and CLI values (highest priority).
    pub fn resolve(file: ConfigFile, args: &Args) -> Result<Self> {
        let listen = parse_listen(
            args.listen
                .as_deref()
                .or(file.listen.as_deref())
                .unwrap_or(DEFAULT_LISTEN),
        )?;

        let log_level = match (args.log_level, &file.log_level) {
            (Some(level), _) => level,
            (None, Some(level)) => parse_log_level(level)?,
            (None, None) => LogLevel::Info,
        };

        let gmp_address = match (&args.gmp_socket, &args.gmp_address) {
            (Some(socket), _) => GmpAddress::Unix(socket.clone()),
            (None, Some(address)) => GmpAddress::Tcp(address.clone()),
            (None, None) => match (file.gmp.socket, file.gmp.address) {
                (_, Some(address)) => GmpAddress::Tcp(address),
                (Some(socket), None) => GmpAddress::Unix(socket),
                (None, None) => GmpAddress::Unix(PathBuf::from(DEFAULT_GMP_SOCKET)),
            },
        };

        let session_backend = match file.session.backend.unwrap_or(SessionBackendKind::Memory) {
            SessionBackendKind::Memory => SessionBackend::Memory,
            SessionBackendKind::File => SessionBackend::File(file.session.path.ok_or_else(|| {
                configuration_error(
                    "session.backend 'file' requires session.path",
                    "Set session.path to a directory where session files can be stored.",
                )
            })?),
        };

        Ok(Self {
            listen,
            log_level,
            playground: file.playground.unwrap_or(false),
            gmp_address,
            gmp_timeout: Duration::from_secs(
                file.gmp.timeout_secs.unwrap_or(DEFAULT_GMP_TIMEOUT_SECS),
            ),
            gmp_max_response_bytes: file
                .gmp
                .max_response_bytes
                .unwrap_or(DEFAULT_MAX_RESPONSE_SIZE),
            cookie_name: file
                .session
                .cookie_name
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            cookie_age_secs: file.session.cookie_age_secs.unwrap_or(DEFAULT_COOKIE_AGE_SECS),
            session_backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
listen: "0.0.0.0:8443"
log_level: debug
playground: true
gmp:
  address: "gvmd.internal:9390"
  timeout_secs: 30
  max_response_bytes: 1048576
session:
  cookie_name: gsad
  cookie_age_secs: 600
  backend: file
  path: /var/lib/hyperion/sessions
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.listen.as_deref(), Some("0.0.0.0:8443"));
        assert_eq!(config.gmp.address.as_deref(), Some("gvmd.internal:9390"));
        assert_eq!(config.session.backend, Some(SessionBackendKind::File));

        let settings = Settings::resolve(config, &Args::default()).unwrap();
        assert_eq!(settings.listen, "0.0.0.0:8443".parse().unwrap());
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert!(settings.playground);
        assert_eq!(settings.gmp_address, GmpAddress::Tcp("gvmd.internal:9390".to_string()));
        assert_eq!(settings.gmp_timeout, Duration::from_secs(30));
        assert_eq!(settings.gmp_max_response_bytes, 1_048_576);
        assert_eq!(settings.cookie_name, "gsad");
        assert_eq!(settings.cookie_age_secs, 600);
        assert_eq!(
            settings.session_backend,
            SessionBackend::File(PathBuf::from("/var/lib/hyperion/sessions"))
        );
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(ConfigFile::default(), &Args::default()).unwrap();
        assert_eq!(settings.listen, DEFAULT_LISTEN.parse().unwrap());
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(!settings.playground);
        assert_eq!(
            settings.gmp_address,
            GmpAddress::Unix(PathBuf::from(DEFAULT_GMP_SOCKET))
        );
        assert_eq!(settings.gmp_max_response_bytes, DEFAULT_MAX_RESPONSE_SIZE);
        assert_eq!(settings.cookie_name, DEFAULT_COOKIE_NAME);
        assert_eq!(settings.cookie_age_secs, 900);
        assert_eq!(settings.session_backend, SessionBackend::Memory);
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
listen: "0.0.0.0:8443"
gmp:
  address: "gvmd.internal:9390"
"#,
        );
        let args = Args {
            config: Some(config_path),
            listen: Some("127.0.0.1:9999".to_string()),
            gmp_socket: Some(PathBuf::from("/tmp/gvmd.sock")),
            gmp_address: None,
            log_level: Some(LogLevel::Error),
        };

        let settings = Settings::load(&args, dir.path()).unwrap();
        assert_eq!(settings.listen, "127.0.0.1:9999".parse().unwrap());
        assert_eq!(settings.gmp_address, GmpAddress::Unix(PathBuf::from("/tmp/gvmd.sock")));
        assert_eq!(settings.log_level, LogLevel::Error);
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "playground: true\n").unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert_eq!(config.unwrap().playground, Some(true));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "invalid: yaml: [[[broken");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_socket_and_address_are_exclusive() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            "gmp:\n  socket: /run/gvmd/gvmd.sock\n  address: \"127.0.0.1:9390\"\n",
        );

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn test_numeric_limits_are_validated() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "session:\n  cookie_age_secs: 0\n");
        assert!(load_config_from_path(&config_path).is_err());

        let config_path = write_config(&dir, "gmp:\n  timeout_secs: 0\n");
        assert!(load_config_from_path(&config_path).is_err());

        let config_path = write_config(&dir, "gmp:\n  max_response_bytes: 0\n");
        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_file_backend_requires_path() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "session:\n  backend: file\n");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("session.path"));
    }

    #[test]
    fn test_invalid_listen_address() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "listen: localhost\n");
        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            "playground: false\nunknown_field: value\ngmp:\n  retries: 3\n",
        );

        // Should succeed (unknown fields are warnings, not errors)
        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.gmp.unknown_fields.contains_key("retries"));
    }
}
