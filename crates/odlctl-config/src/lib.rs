//! Configuration for odlctl.
//!
//! One flat TOML file plus `ODL_*` environment variables, credential
//! resolution (config/env → keyring → default) and translation to
//! `odlctl_core::ControllerConfig`. The CLI layers its flag overrides on
//! top of the loaded [`Config`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use odlctl_core::{ControllerConfig, HttpTrace, TlsVerification};

/// Keyring service name; accounts are `{user}@{host}`.
pub const KEYRING_SERVICE: &str = "odlctl";

/// Password used when nothing else is configured.
pub const DEFAULT_PASSWORD: &str = "admin";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Connection settings for one controller.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// RESTCONF root; wins over `host`/`port` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_user", deserialize_with = "lenient_string")]
    pub user: String,

    /// Plaintext password (prefer the keyring or `ODL_PASS`).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: None,
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("timeout", &self.timeout)
            .field("insecure", &self.insecure)
            .field("ca_cert", &self.ca_cert)
            .finish()
    }
}

fn default_host() -> String {
    "localhost".into()
}
fn default_port() -> u16 {
    8181
}
fn default_user() -> String {
    "admin".into()
}
fn default_timeout() -> u64 {
    30
}

/// Environment values that look numeric (`ODL_PASS=1234`) arrive as
/// numbers; accept any scalar as a string.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Uint(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Uint(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    lenient_string(deserializer).map(Some)
}

impl Config {
    /// The RESTCONF root all resource paths hang off.
    ///
    /// A `url` ending in a datastore segment (`.../restconf/operational/`)
    /// is trimmed back to the root.
    pub fn restconf_root(&self) -> Result<Url, ConfigError> {
        let raw = match &self.url {
            Some(url) => {
                let trimmed = url.trim_end_matches('/');
                trimmed
                    .strip_suffix("/operational")
                    .or_else(|| trimmed.strip_suffix("/config"))
                    .unwrap_or(trimmed)
                    .to_owned()
            }
            None => format!("http://{}:{}/restconf", self.host, self.port),
        };
        Url::parse(&raw).map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("{e}: {raw}"),
        })
    }

    /// Host part used to key keyring entries.
    pub fn controller_host(&self) -> String {
        self.restconf_root()
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_else(|| self.host.clone())
    }

    /// Keyring account for this user and controller.
    pub fn keyring_account(&self) -> String {
        format!("{}@{}", self.user, self.controller_host())
    }

    /// Password from config/env, then the keyring, then `admin`.
    pub fn resolve_password(&self) -> SecretString {
        resolve_password_with(self.password.as_deref(), || {
            keyring_lookup(&self.keyring_account())
        })
    }

    pub fn tls(&self) -> TlsVerification {
        if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        }
    }

    /// Build the core connection config. Tracing starts off; the CLI
    /// raises it from `--debug`.
    pub fn to_controller_config(&self) -> Result<ControllerConfig, ConfigError> {
        Ok(ControllerConfig {
            url: self.restconf_root()?,
            username: self.user.clone(),
            password: self.resolve_password(),
            tls: self.tls(),
            timeout: Duration::from_secs(self.timeout),
            trace: HttpTrace::Off,
        })
    }

    /// Render as TOML with the password masked.
    pub fn to_toml_masked(&self) -> Result<String, ConfigError> {
        let mut masked = self.clone();
        if masked.password.is_some() {
            masked.password = Some("****".into());
        }
        Ok(toml::to_string_pretty(&masked)?)
    }
}

// ── Credential resolution ───────────────────────────────────────────

fn resolve_password_with(
    explicit: Option<&str>,
    keyring: impl FnOnce() -> Option<String>,
) -> SecretString {
    if let Some(pw) = explicit {
        return SecretString::from(pw.to_owned());
    }
    if let Some(pw) = keyring() {
        debug!("password resolved from keyring");
        return SecretString::from(pw);
    }
    SecretString::from(DEFAULT_PASSWORD.to_owned())
}

fn keyring_lookup(account: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account).ok()?;
    match entry.get_password() {
        Ok(pw) => Some(pw),
        Err(e) => {
            debug!(account, error = %e, "no keyring password");
            None
        }
    }
}

/// Store `password` in the OS keyring under `config`'s account.
pub fn store_password(config: &Config, password: &str) -> Result<String, ConfigError> {
    let account = config.keyring_account();
    keyring::Entry::new(KEYRING_SERVICE, &account)?.set_password(password)?;
    Ok(account)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "odlctl", "odlctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("odlctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load defaults → TOML file at `path` → `ODL_*` environment.
///
/// `ODL_PASS` maps to `password`. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ODL_").map(|key| {
            if key.as_str() == "pass" {
                "password".into()
            } else {
                key.as_str().to_owned().into()
            }
        }));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load from the platform config path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}
