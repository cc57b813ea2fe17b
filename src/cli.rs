use clap::Parser;
use std::path::PathBuf;

/// Log verbosity accepted by `--log-level` and `log_level` in the config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!(
                "Invalid log level: {}. Please specify one of 'trace', 'debug', 'info', 'warn' or 'error'",
                s
            )),
        }
    }
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// GraphQL API gateway for the Greenbone Management Protocol
#[derive(Parser, Debug, Default)]
#[command(name = "hyperion")]
#[command(version)]
#[command(about = "GraphQL API gateway for the Greenbone Management Protocol", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ./hyperion.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address the HTTP server binds to, e.g. 127.0.0.1:8080
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Unix socket gvmd listens on
    #[arg(long, value_name = "PATH", conflicts_with = "gmp_address")]
    pub gmp_socket: Option<PathBuf>,

    /// TCP address gvmd listens on (host:port)
    #[arg(long, value_name = "HOST:PORT")]
    pub gmp_address: Option<String>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
