// ── Node family ──
//
// GET operational/opendaylight-inventory:nodes           → {"nodes": {"node": [...]}}
// GET operational/opendaylight-inventory:nodes/node/{id} → {"node": [{...}]}

use serde_json::Value;

use super::{INVENTORY, PathTemplate, ResourceFamily};
use crate::error::CoreError;
use crate::model::Node;
use crate::model::document::Fields;

#[derive(Debug, Clone, Copy)]
pub struct NodeFamily;

impl ResourceFamily for NodeFamily {
    type Entity = Node;
    type Scope = ();

    const NAME: &'static str = "node";

    fn template() -> PathTemplate {
        PathTemplate::new(INVENTORY, &[], "node")
    }

    /// A controller with no switches answers `{"nodes": {}}`; that reads
    /// as an empty list.
    fn decode_many(doc: &Value, _scope: &()) -> Result<Vec<Node>, CoreError> {
        let nodes = Fields::new("Nodes response", doc)?.required("nodes")?;
        Fields::new("Nodes response", nodes)?
            .optional_array("node")
            .iter()
            .map(Node::from_document)
            .collect()
    }

    fn decode_one(doc: &Value, id: &str, _scope: &()) -> Result<Node, CoreError> {
        Fields::new("Node response", doc)?
            .required_array("node")?
            .first()
            .ok_or_else(|| CoreError::not_found(Self::NAME, id))
            .and_then(Node::from_document)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn node(id: &str) -> Value {
        json!({ "id": id, "flow-node-inventory:table": [], "node-connector": [] })
    }

    #[test]
    fn many_preserves_order() {
        let doc = json!({ "nodes": { "node": [node("n1"), node("n2")] } });
        let ids: Vec<String> = NodeFamily::decode_many(&doc, &())
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["n1", "n2"]);
    }

    #[test]
    fn many_without_nodes_is_empty() {
        let doc = json!({ "nodes": {} });
        assert!(NodeFamily::decode_many(&doc, &()).unwrap().is_empty());
    }

    #[test]
    fn many_without_wrapper_is_an_error() {
        assert!(matches!(
            NodeFamily::decode_many(&json!({}), &()),
            Err(CoreError::MissingRequiredField { .. })
        ));
    }

    #[test]
    fn one_takes_first_element() {
        let doc = json!({ "node": [node("openflow:1")] });
        assert_eq!(NodeFamily::decode_one(&doc, "openflow:1", &()).unwrap().id, "openflow:1");
    }

    #[test]
    fn one_from_empty_array_is_not_found() {
        let doc = json!({ "node": [] });
        match NodeFamily::decode_one(&doc, "openflow:9", &()) {
            Err(CoreError::NotFound {
                entity_type,
                identifier,
            }) => {
                assert_eq!(entity_type, "node");
                assert_eq!(identifier, "openflow:9");
            }
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }
}
