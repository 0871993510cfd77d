// ── Flow table ──

use serde::Serialize;
use serde_json::Value;

use super::document::Fields;
use super::flow::Flow;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub id: u32,
    /// Flows in document order.
    pub flows: Vec<Flow>,
    pub flow_hash_id_map: Option<Value>,
    pub aggregate_flow_statistics: Option<Value>,
    pub flow_table_statistics: Option<Value>,
}

impl Table {
    /// Flows that omit `table_id` inherit the id of the table they were
    /// read from.
    pub fn from_document(doc: &Value) -> Result<Self, CoreError> {
        let f = Fields::new("Table", doc)?;
        let id = f.required_u32("id")?;
        let flows = f
            .optional_array("flow")
            .iter()
            .map(|d| -> Result<Flow, CoreError> {
                let mut flow = Flow::from_document(d)?;
                flow.table_id.get_or_insert(id);
                Ok(flow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            flows,
            flow_hash_id_map: f.optional(&["flow-hash-id-map"]),
            aggregate_flow_statistics: f
                .optional(&["opendaylight-flow-statistics:aggregate-flow-statistics"]),
            flow_table_statistics: f
                .optional(&["opendaylight-flow-table-statistics:flow-table-statistics"]),
        })
    }

    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    pub fn has_flows(&self) -> bool {
        !self.flows.is_empty()
    }

    pub fn flow(&self, id: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zero_flows_is_valid() {
        let table = Table::from_document(&json!({ "id": 3 })).unwrap();
        assert_eq!(table.id, 3);
        assert!(!table.has_flows());
        assert!(table.flow_hash_id_map.is_none());
    }

    #[test]
    fn flows_keep_document_order_and_inherit_table_id() {
        let doc = json!({
            "id": 0,
            "flow": [
                { "id": "b", "priority": 1 },
                { "id": "a", "table_id": 0, "priority": 9 }
            ],
            "opendaylight-flow-table-statistics:flow-table-statistics": { "active-flows": 2 }
        });
        let table = Table::from_document(&doc).unwrap();

        let ids: Vec<&str> = table.flows.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(table.flows.iter().all(|f| f.table_id == Some(0)));
        assert_eq!(table.flow("a").map(|f| f.priority), Some(9));
        assert_eq!(
            table.flow_table_statistics,
            Some(json!({ "active-flows": 2 }))
        );
    }

    #[test]
    fn missing_id_is_an_error() {
        assert!(matches!(
            Table::from_document(&json!({ "flow": [] })),
            Err(CoreError::MissingRequiredField { entity: "Table", .. })
        ));
    }

    #[test]
    fn bad_flow_fails_the_table() {
        let doc = json!({ "id": 1, "flow": [{ "priority": 1 }] });
        assert!(matches!(
            Table::from_document(&doc),
            Err(CoreError::MissingRequiredField { entity: "Flow", .. })
        ));
    }
}
