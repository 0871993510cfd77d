// ── Switch node ──

use serde::Serialize;
use serde_json::Value;

use super::connector::Connector;
use super::document::Fields;
use super::flow::Flow;
use super::table::Table;
use crate::error::CoreError;

/// An OpenFlow switch as reported by the operational inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    /// Tables in document order, including empty ones.
    pub tables: Vec<Table>,
    pub connectors: Vec<Connector>,
    pub ip_address: Option<String>,
    pub hardware: Option<String>,
    pub software: Option<String>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub switch_features: Option<Value>,
    pub meter_features: Option<Value>,
}

impl Node {
    pub fn from_document(doc: &Value) -> Result<Self, CoreError> {
        let f = Fields::new("Node", doc)?;
        let tables = f
            .required_array("flow-node-inventory:table")?
            .iter()
            .map(Table::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        let connectors = f
            .required_array("node-connector")?
            .iter()
            .map(Connector::from_document)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: f.required_string("id")?,
            tables,
            connectors,
            ip_address: f.optional_string(&["flow-node-inventory:ip-address"]),
            hardware: f.optional_string(&["flow-node-inventory:hardware"]),
            software: f.optional_string(&["flow-node-inventory:software"]),
            manufacturer: f.optional_string(&["flow-node-inventory:manufacturer"]),
            serial_number: f.optional_string(&["flow-node-inventory:serial-number"]),
            description: f.optional_string(&["flow-node-inventory:description"]),
            switch_features: f.optional(&["flow-node-inventory:switch-features"]),
            meter_features: f.optional(&["opendaylight-meter-statistics:meter-features"]),
        })
    }

    pub fn table(&self, id: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn connector(&self, port_number: &str) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.has_port_number(port_number))
    }

    /// Tables holding at least one flow.
    pub fn active_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| t.has_flows())
    }

    /// Every flow of every table, in table then document order.
    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        self.tables.iter().flat_map(|t| t.flows.iter())
    }
}
