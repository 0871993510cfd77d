//! Inventory model, flow codecs and resource managers for OpenDaylight.
//!
//! - **[`Controller`]** holds the connection identity and vends one
//!   [`ResourceManager`] per family ([`NodeFamily`], [`FlowFamily`]).
//! - **Domain model** ([`model`]): [`Node`], [`Table`], [`Connector`],
//!   [`Flow`], built from raw RESTCONF documents.
//! - **Codecs** ([`codec`]): `--actions` and match expressions to wire
//!   documents and back to one-line summaries.

pub mod codec;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod resource;
pub mod xml;

// ── Primary re-exports ──────────────────────────────────────────────
pub use codec::{
    ActionKind, ActionRegistry, InstructionCodec, InstructionDocument, MatchDocument, MatchOptions,
};
pub use config::{ControllerConfig, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use odlctl_api::HttpTrace;
pub use model::{Connector, DEFAULT_PRIORITY, Flow, Node, Table};
pub use resource::{
    Datastore, FlowBody, FlowFamily, FlowScope, NodeFamily, ParentScope, PathTemplate,
    ResourceFamily, ResourceManager, WritableFamily,
};
