use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the server binary.
///
/// These codes let service managers tell a broken configuration apart
/// from a failure that happened while serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean shutdown
    Success = 0,
    /// The configuration file or command-line overrides were rejected
    ConfigurationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Runtime failure (bind error, session store failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ConfigurationError => write!(f, "Configuration Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Domain errors raised while mediating between GraphQL and gvmd.
///
/// The `Display` text of the first four variants is what GraphQL clients
/// see in the `errors[].message` field, so it is kept short and stable.
#[derive(Debug, Error)]
pub enum HyperionError {
    #[error("Not Authorized")]
    NotAuthorized,

    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Rejected user input (conflicting arguments, bad cursors, ...)
    #[error("{message}")]
    InvalidInput { message: String },

    /// gvmd answered with a non-2xx status
    #[error("{status_text}")]
    GmpStatus {
        command: String,
        status: u16,
        status_text: String,
    },

    #[error("Failed to find {kind} '{id}'")]
    EntityNotFound { kind: String, id: String },

    #[error("Failed to communicate with gvmd at {address}\nDetails: {details}\n\n💡 Hint: Please verify that gvmd is running and the configured socket or address is reachable")]
    GmpTransport { address: String, details: String },

    #[error("Invalid response to <{command}>: {details}")]
    GmpProtocol { command: String, details: String },

    #[error("Failed to access session store: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the session directory exists and is writable")]
    SessionStore { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    Configuration { message: String, hint: String },
}

impl HyperionError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        HyperionError::InvalidInput {
            message: message.into(),
        }
    }
}
