//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use odlctl_config::ConfigError;
use odlctl_core::{ActionRegistry, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the controller: {reason}")]
    #[diagnostic(
        code(odlctl::connection_failed),
        help(
            "Check that the controller is running with RESTCONF enabled.\n\
             Set the root with --url / ODL_URL, or --host / --port.\n\
             Try: odlctl --debug node list"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(odlctl::auth_failed),
        help(
            "Verify the user (--user / ODL_USER) and password (ODL_PASS).\n\
             Store a password with: odlctl config set-password"
        )
    )]
    AuthFailed { status: u16 },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(odlctl::not_found),
        help("Run: odlctl {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Controller rejected flow '{flow}'")]
    #[diagnostic(
        code(odlctl::flow_rejected),
        help("Re-run with --debug-body to see the controller's answer.")
    )]
    FlowRejected { flow: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({status}): {message}")]
    #[diagnostic(code(odlctl::api_error))]
    ApiError { status: String, message: String },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(odlctl::invalid_response),
        help("Re-run with --debug-body to inspect the raw document.")
    )]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(odlctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(odlctl::config),
        help("Inspect the effective settings with: odlctl config show")
    )]
    Config { message: String },

    #[error("Keyring error: {message}")]
    #[diagnostic(code(odlctl::keyring))]
    Keyring { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::FlowRejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn not_found(
        resource_type: &str,
        identifier: impl Into<String>,
        list_command: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingRequiredField { .. } | CoreError::InvalidField { .. } => {
                CliError::InvalidResponse {
                    message: err.to_string(),
                }
            }

            CoreError::Json { message } => CliError::InvalidResponse { message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type} list"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::MalformedActionExpression { expression, reason } => {
                CliError::Validation {
                    field: "actions".into(),
                    reason: format!("'{expression}': {reason}"),
                }
            }

            CoreError::MalformedAddressExpression { expression } => CliError::Validation {
                field: "MAC address".into(),
                reason: format!("'{expression}': expected ADDRESS or ADDRESS/MASK"),
            },

            CoreError::UnknownActionKind { keyword } => {
                let known: Vec<String> = ActionRegistry::with_builtins()
                    .kinds()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                CliError::Validation {
                    field: "actions".into(),
                    reason: format!(
                        "unknown action kind '{keyword}' (expected one of: {})",
                        known.join(", ")
                    ),
                }
            }

            CoreError::Encoding(message) => CliError::Validation {
                field: "flow".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Api {
                message,
                connection: true,
                ..
            } => CliError::ConnectionFailed { reason: message },

            CoreError::Api {
                status: Some(status @ (401 | 403)),
                ..
            } => CliError::AuthFailed { status },

            CoreError::Api {
                message,
                status: Some(404),
                ..
            } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: message,
                list_command: "node list".into(),
            },

            CoreError::Api {
                message, status, ..
            } => CliError::ApiError {
                status: status.map_or_else(|| "-".into(), |s| s.to_string()),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Keyring(e) => CliError::Keyring {
                message: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
