// ── Controller client ──
//
// Holds the connection identity and vends one resource manager per
// family. Managers borrow the transport; nothing is cached between calls.

use odlctl_api::transport::{TlsMode, TransportConfig};
use odlctl_api::{RestconfClient, Transport};
use tracing::debug;

use crate::config::{ControllerConfig, TlsVerification};
use crate::error::CoreError;
use crate::resource::{FlowFamily, NodeFamily, ResourceManager};

/// Entry point for talking to one controller.
#[derive(Debug)]
pub struct Controller<T = RestconfClient> {
    transport: T,
}

impl Controller<RestconfClient> {
    /// Build the reqwest-backed transport from `config`.
    pub fn new(config: &ControllerConfig) -> Result<Self, CoreError> {
        debug!(url = %config.url, user = %config.username, "connecting");
        let client = RestconfClient::new(
            config.url.clone(),
            config.username.clone(),
            config.password.clone(),
            &build_transport(config),
        )?;
        Ok(Self::with_transport(client))
    }
}

impl<T: Transport> Controller<T> {
    /// Wrap an existing transport (tests, alternative HTTP stacks).
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Switches: `list_all(&())`, `get(id, &())`.
    pub fn nodes(&self) -> ResourceManager<'_, NodeFamily, T> {
        ResourceManager::new(&self.transport)
    }

    /// Flow rules scoped by node and table; also supports `create`.
    pub fn flows(&self) -> ResourceManager<'_, FlowFamily, T> {
        ResourceManager::new(&self.transport)
    }
}

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        trace: config.trace,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
