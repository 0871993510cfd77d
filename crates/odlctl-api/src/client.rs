// RESTCONF HTTP client
//
// Wraps `reqwest::Client` with RESTCONF URL construction, basic auth and
// optional curl-style exchange tracing. Resource paths are composed by the
// caller; this module only escapes their segments onto the RESTCONF root.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::transport::{
    HttpResponse, HttpTrace, RequestBody, RestconfPath, Transport, TransportConfig,
};

const ACCEPT: &str = "application/json";
const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for a controller's RESTCONF root
/// (e.g. `http://localhost:8181/restconf`).
///
/// Holds the connection identity: base URL and credentials. Reads return
/// the JSON body text untouched; decoding happens in `odlctl-core`.
pub struct RestconfClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    trace: HttpTrace,
}

impl RestconfClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: username.into(),
            password,
            trace: transport.trace,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username: username.into(),
            password,
            trace: HttpTrace::Off,
        }
    }

    /// The RESTCONF root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a path below the RESTCONF root. Each segment
    /// is percent-escaped, `/`, `?`, `#` and `%` included.
    pub fn url(&self, path: &RestconfPath) -> Result<Url, Error> {
        let mut full = self.base_url.clone();
        full.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(full)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<RequestBody>,
    ) -> Result<HttpResponse, Error> {
        debug!("{method} {url}");

        let content_type = body.as_ref().map_or(ACCEPT, |b| b.content_type);
        self.trace_request(&method, &url, content_type, body.as_ref());

        let mut builder = self
            .http
            .request(method, url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::CONTENT_TYPE, content_type);
        if let Some(body) = body {
            builder = builder.body(body.text);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_owned(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = resp.text().await.map_err(Error::Transport)?;

        let response = HttpResponse {
            status: status.as_u16(),
            headers,
            body,
        };
        self.trace_response(status, &response);
        Ok(response)
    }

    // ── Exchange tracing ─────────────────────────────────────────────

    fn trace_request(
        &self,
        method: &Method,
        url: &Url,
        content_type: &str,
        body: Option<&RequestBody>,
    ) {
        if !self.trace.is_enabled() {
            return;
        }
        let data = match (self.trace, body) {
            (HttpTrace::Full, Some(b)) => format!(" -d '{}'", b.text),
            (_, Some(_)) => " -d @body".to_owned(),
            (_, None) => String::new(),
        };
        info!(
            target: "odlctl::http",
            "curl -i -H \"Accept: {ACCEPT}\" -H \"Content-Type: {content_type}\" \
             -u \"{}:****\" -X {method} \"{url}\"{data}",
            self.username,
        );
    }

    fn trace_response(&self, status: reqwest::StatusCode, resp: &HttpResponse) {
        if !self.trace.is_enabled() {
            return;
        }
        info!(
            target: "odlctl::http",
            "HTTP/1.1 {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        for (k, v) in &resp.headers {
            info!(target: "odlctl::http", "{k}: {v}");
        }
        if self.trace == HttpTrace::Full {
            info!(target: "odlctl::http", "{}", resp.body);
        } else {
            info!(
                target: "odlctl::http",
                "(response body truncated, {} chars; use --debug-body to show it)",
                resp.body.chars().count()
            );
        }
    }
}

impl Transport for RestconfClient {
    /// `GET {root}/{path}`; a non-2xx answer becomes `Error::Status`.
    async fn get(&self, path: &RestconfPath) -> Result<HttpResponse, Error> {
        let url = self.url(path)?;
        let resp = self.send(Method::GET, url.clone(), None).await?;
        if resp.is_success() {
            return Ok(resp);
        }
        Err(Error::Status {
            status: resp.status,
            url: url.to_string(),
            message: resp.body.chars().take(BODY_PREVIEW_CHARS).collect(),
        })
    }

    /// `PUT {root}/{path}`; the status is returned as-is.
    async fn put(&self, path: &RestconfPath, body: RequestBody) -> Result<HttpResponse, Error> {
        let url = self.url(path)?;
        self.send(Method::PUT, url, Some(body)).await
    }
}
