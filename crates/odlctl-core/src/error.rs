// ── Core error types ──
//
// Errors surfaced by the inventory model, the flow codecs and the resource
// managers. Transport failures from `odlctl-api` are wrapped, not
// reinterpreted: the `From<odlctl_api::Error>` impl keeps the status code
// and message for the CLI to render.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Document errors ──────────────────────────────────────────────
    #[error("{entity} document is missing required field '{field}'")]
    MissingRequiredField { entity: &'static str, field: String },

    #[error("{entity} field '{field}' is not a valid {expected}")]
    InvalidField {
        entity: &'static str,
        field: String,
        expected: &'static str,
    },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Response body is not valid JSON: {message}")]
    Json { message: String },

    // ── Expression errors ────────────────────────────────────────────
    #[error("Malformed action expression '{expression}': {reason}")]
    MalformedActionExpression { expression: String, reason: String },

    #[error("Malformed address expression '{expression}': expected ADDRESS or ADDRESS/MASK")]
    MalformedAddressExpression { expression: String },

    #[error("Unknown action kind '{keyword}'")]
    UnknownActionKind { keyword: String },

    // ── Wire encoding ────────────────────────────────────────────────
    #[error("Failed to encode request body: {0}")]
    Encoding(String),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
        /// Whether the failure happened before any HTTP status was received.
        connection: bool,
    },
}

impl CoreError {
    pub(crate) fn missing(entity: &'static str, field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            entity,
            field: field.into(),
        }
    }

    pub(crate) fn not_found(entity_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_owned(),
            identifier: identifier.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<odlctl_api::Error> for CoreError {
    fn from(err: odlctl_api::Error) -> Self {
        match err {
            odlctl_api::Error::Transport(ref e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
                connection: e.is_connect() || e.is_timeout(),
            },
            odlctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            odlctl_api::Error::Tls(message) => CoreError::Api {
                message: format!("TLS error: {message}"),
                status: None,
                connection: true,
            },
            odlctl_api::Error::Status {
                status,
                url,
                message,
            } => CoreError::Api {
                message: format!("{url}: {message}"),
                status: Some(status),
                connection: false,
            },
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}
