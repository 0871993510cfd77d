use thiserror::Error;

/// Top-level error type for the `odlctl-api` crate.
///
/// Only transport-level failures live here. Document decoding and status
/// interpretation beyond "did the read succeed" belong to `odlctl-core`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── RESTCONF ────────────────────────────────────────────────────
    /// A read returned a non-2xx status.
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },
}
