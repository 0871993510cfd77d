// ── Runtime connection configuration ──
//
// These types describe *how* to reach a controller's RESTCONF root.
// They carry credential data and connection tuning, but never touch disk.
// The CLI builds a `ControllerConfig` and hands it in.

use secrecy::SecretString;
use url::Url;

use odlctl_api::HttpTrace;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Connection identity for a single controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// RESTCONF root (e.g., `http://localhost:8181/restconf`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Request timeout, enforced by the transport.
    pub timeout: std::time::Duration,
    /// HTTP exchange tracing level.
    pub trace: HttpTrace,
}
