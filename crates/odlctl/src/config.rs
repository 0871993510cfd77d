//! CLI configuration: thin wrapper around `odlctl_config`.
//!
//! Layers the `GlobalOpts` flag overrides (--url, --host, --user, ...) on
//! top of the loaded file/env config.

use odlctl_core::{ControllerConfig, HttpTrace};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use odlctl_config::{Config, config_path, load_config, store_password};

/// Apply flag overrides. Clap already folded the `ODL_*` variables into
/// `global`, so a set field always wins.
pub fn apply_overrides(mut cfg: Config, global: &GlobalOpts) -> Config {
    if let Some(ref url) = global.url {
        cfg.url = Some(url.clone());
    }
    if let Some(ref host) = global.host {
        cfg.host.clone_from(host);
    }
    if let Some(port) = global.port {
        cfg.port = port;
    }
    if let Some(ref user) = global.user {
        cfg.user.clone_from(user);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
    cfg
}

/// Load the effective config for this invocation.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(apply_overrides(load_config()?, global))
}

/// Translate the effective config into a `ControllerConfig`.
pub fn controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let mut cc = resolve(global)?.to_controller_config()?;
    cc.trace = HttpTrace::from_flags(global.debug, global.debug_body);
    Ok(cc)
}
