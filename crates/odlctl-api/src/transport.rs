// Transport seam and shared reqwest::Client construction.
//
// The core talks to the controller only through the `Transport` trait:
// GET a path below the RESTCONF root, PUT a body at a path. The
// reqwest-backed implementation lives in `client.rs`.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

// ── Wire types ──────────────────────────────────────────────────────

/// A location below the RESTCONF root, held as unescaped segments.
///
/// Segments are percent-escaped when the client joins them onto the root
/// URL, so an id such as `web?v=2` or `a/b` stays one segment. `:` is left
/// alone (`openflow:1`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestconfPath {
    segments: Vec<String>,
}

impl RestconfPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Builder form of [`push`](Self::push).
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.push(segment);
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl<S: Into<String>> FromIterator<S> for RestconfPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for RestconfPath {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.segments.extend(iter.into_iter().map(Into::into));
    }
}

/// Unescaped, for logs.
impl fmt::Display for RestconfPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// A completed HTTP exchange as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// `true` for any status in the 2xx family.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An outgoing document body with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub text: String,
}

impl RequestBody {
    pub fn xml(text: impl Into<String>) -> Self {
        Self {
            content_type: "application/xml",
            text: text.into(),
        }
    }
}

/// HTTP collaborator used by the resource managers.
///
/// `path` is relative to the RESTCONF root (e.g.
/// `operational/opendaylight-inventory:nodes`). Reads fail on non-2xx;
/// writes hand back whatever status the controller answered with.
pub trait Transport {
    fn get(&self, path: &RestconfPath)
    -> impl Future<Output = Result<HttpResponse, Error>> + Send;

    fn put(
        &self,
        path: &RestconfPath,
        body: RequestBody,
    ) -> impl Future<Output = Result<HttpResponse, Error>> + Send;
}

// ── HTTP exchange tracing ───────────────────────────────────────────

/// How much of each HTTP exchange to log on the `odlctl::http` target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpTrace {
    #[default]
    Off,
    /// Request line, status line and headers; body length only.
    Headers,
    /// Everything, including the response body.
    Full,
}

impl HttpTrace {
    pub fn from_flags(debug: bool, body: bool) -> Self {
        match (debug, body) {
            (_, true) => Self::Full,
            (true, false) => Self::Headers,
            (false, false) => Self::Off,
        }
    }

    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

// ── Client construction ─────────────────────────────────────────────

/// TLS verification mode (api-level mirror of core's TlsVerification).
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed controllers).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub trace: HttpTrace,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            trace: HttpTrace::Off,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("odlctl/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
