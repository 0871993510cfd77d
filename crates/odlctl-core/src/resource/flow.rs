// ── Flow family ──
//
// Flows live under a node and a table:
//
// GET operational/.../node/{node}/table/{table}          → {"flow-node-inventory:table": [{... "flow": [...]}]}
// GET operational/.../node/{node}/table/{table}/flow/{id} → {"flow-node-inventory:flow": [{...}]}
// PUT config/.../node/{node}/table/{table}/flow/{id}      ← <flow xmlns="urn:opendaylight:flow:inventory">

use serde_json::Value;

use odlctl_api::RequestBody;

use super::{INVENTORY, ParentScope, PathTemplate, ResourceFamily, WritableFamily};
use crate::codec::{Document, InstructionDocument, MatchDocument};
use crate::error::CoreError;
use crate::model::document::Fields;
use crate::model::{DEFAULT_PRIORITY, Flow, Table};
use crate::xml;

/// XML namespace of the flow element on the write path.
pub const FLOW_NAMESPACE: &str = "urn:opendaylight:flow:inventory";

/// The node and table a flow belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowScope {
    pub node_id: String,
    pub table_id: u32,
}

impl FlowScope {
    pub fn new(node_id: impl Into<String>, table_id: u32) -> Self {
        Self {
            node_id: node_id.into(),
            table_id,
        }
    }
}

impl ParentScope for FlowScope {
    fn parent_ids(&self) -> Vec<String> {
        vec![self.node_id.clone(), self.table_id.to_string()]
    }
}

/// Everything a new flow carries besides its id and scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowBody {
    /// Written as 32768 when unset.
    pub priority: Option<u32>,
    pub flow_name: Option<String>,
    pub hard_timeout: Option<u32>,
    pub idle_timeout: Option<u32>,
    pub match_: MatchDocument,
    /// `None` creates a drop flow.
    pub instructions: Option<InstructionDocument>,
}

impl FlowBody {
    /// Wire document in element order.
    fn to_document(&self, id: &str, table_id: u32) -> Document {
        let mut doc = Document::new();
        doc.insert("id".into(), Value::from(id));
        doc.insert("table_id".into(), Value::from(table_id));
        doc.insert(
            "priority".into(),
            Value::from(self.priority.unwrap_or(DEFAULT_PRIORITY)),
        );
        if let Some(name) = &self.flow_name {
            doc.insert("flow-name".into(), Value::from(name.as_str()));
        }
        if let Some(t) = self.hard_timeout {
            doc.insert("hard-timeout".into(), Value::from(t));
        }
        if let Some(t) = self.idle_timeout {
            doc.insert("idle-timeout".into(), Value::from(t));
        }
        doc.insert(
            "match".into(),
            Value::Object(self.match_.as_document().clone()),
        );
        if let Some(instructions) = &self.instructions {
            doc.insert(
                "instructions".into(),
                Value::Object(instructions.as_document().clone()),
            );
        }
        doc
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FlowFamily;

fn inherit_table(mut flow: Flow, scope: &FlowScope) -> Flow {
    flow.table_id.get_or_insert(scope.table_id);
    flow
}

impl ResourceFamily for FlowFamily {
    type Entity = Flow;
    type Scope = FlowScope;

    const NAME: &'static str = "flow";

    fn template() -> PathTemplate {
        PathTemplate::new(INVENTORY, &["node", "table"], "flow")
    }

    fn decode_many(doc: &Value, scope: &FlowScope) -> Result<Vec<Flow>, CoreError> {
        let fields = Fields::new("Table response", doc)?;
        let Some(table) = fields.required_array("flow-node-inventory:table")?.first() else {
            return Ok(Vec::new());
        };
        let table = Table::from_document(table)?;
        Ok(table
            .flows
            .into_iter()
            .map(|f| inherit_table(f, scope))
            .collect())
    }

    fn decode_one(doc: &Value, id: &str, scope: &FlowScope) -> Result<Flow, CoreError> {
        let first = Fields::new("Flow response", doc)?
            .required_array("flow-node-inventory:flow")?
            .first()
            .ok_or_else(|| CoreError::not_found(Self::NAME, id))?;
        Flow::from_document(first).map(|f| inherit_table(f, scope))
    }
}

impl WritableFamily for FlowFamily {
    type Body = FlowBody;

    fn encode_body(id: &str, body: &FlowBody, scope: &FlowScope) -> Result<RequestBody, CoreError> {
        let doc = body.to_document(id, scope.table_id);
        Ok(RequestBody::xml(xml::to_xml("flow", FLOW_NAMESPACE, &doc)?))
    }
}
