// ── Node connector (switch port) ──

use serde::Serialize;
use serde_json::Value;

use super::document::Fields;
use crate::error::CoreError;

const NS: &str = "flow-node-inventory";

fn key(name: &str) -> String {
    format!("{NS}:{name}")
}

/// A switch port. Only `id` is required; everything else is reported by
/// the switch and may be missing on a freshly connected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub id: String,
    /// Port identifier as used in `in-port` matches and `output:` actions.
    pub port_number: Option<String>,
    pub name: Option<String>,
    pub hardware_address: Option<String>,
    pub current_speed: Option<u64>,
    pub maximum_speed: Option<u64>,
    pub state: Option<Value>,
    pub configuration: Option<Value>,
    pub advertised_features: Option<Value>,
    pub supported: Option<Value>,
    pub current_feature: Option<Value>,
    pub peer_features: Option<Value>,
    pub statistics: Option<Value>,
}

impl Connector {
    pub fn from_document(doc: &Value) -> Result<Self, CoreError> {
        let f = Fields::new("Connector", doc)?;
        let opt = |name: &str| f.optional(&[key(name).as_str()]);
        Ok(Self {
            id: f.required_string("id")?,
            port_number: f.optional_string(&[key("port-number").as_str()]),
            name: f.optional_string(&[key("name").as_str()]),
            hardware_address: f.optional_string(&[key("hardware-address").as_str()]),
            current_speed: f.optional_u64(&[key("current-speed").as_str()]),
            maximum_speed: f.optional_u64(&[key("maximum-speed").as_str()]),
            state: opt("state"),
            configuration: opt("configuration"),
            advertised_features: opt("advertised-features"),
            supported: opt("supported"),
            current_feature: opt("current-feature"),
            peer_features: opt("peer-features"),
            statistics: f
                .optional(&["opendaylight-port-statistics:flow-capable-node-connector-statistics"]),
        })
    }

    /// Whether this port answers to `port_number` (`"1"`, `"LOCAL"`, ...).
    pub fn has_port_number(&self, port_number: &str) -> bool {
        self.port_number.as_deref() == Some(port_number)
    }
}
