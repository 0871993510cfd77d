// ── Action encoder registry ──
//
// Maps an action keyword to the pure function that produces its wire
// record. The registry is assembled once at composition time and handed
// to the `InstructionCodec`; adding a kind never touches the codec.

use std::collections::HashMap;
use std::str::FromStr;

use serde_json::{Value, json};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::Document;
use crate::error::CoreError;

/// Action keywords understood in `--actions` expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum ActionKind {
    /// `output:<port>`
    Output,
    /// `group:<group-id>`
    Group,
    /// `set-queue:<queue-id>`
    SetQueue,
    /// `pop-vlan:`
    PopVlan,
}

/// `(raw_value, order) -> action record`. The record carries its own
/// `order` field.
pub type ActionEncoder = fn(&str, u32) -> Result<Document, CoreError>;

// ── Registry ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ActionRegistry {
    encoders: HashMap<ActionKind, ActionEncoder>,
}

impl ActionRegistry {
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    /// A registry holding every built-in encoder.
    pub fn with_builtins() -> Self {
        Self::builder().builtins().build()
    }

    /// Encode one action token.
    pub fn build(&self, keyword: &str, raw_value: &str, order: u32) -> Result<Document, CoreError> {
        let unknown = || CoreError::UnknownActionKind {
            keyword: keyword.to_owned(),
        };
        let kind = ActionKind::from_str(keyword).map_err(|_| unknown())?;
        let encoder = self.encoders.get(&kind).ok_or_else(unknown)?;
        encoder(raw_value, order)
    }

    /// Registered kinds, in declaration order.
    pub fn kinds(&self) -> Vec<ActionKind> {
        ActionKind::iter()
            .filter(|k| self.encoders.contains_key(k))
            .collect()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[derive(Debug, Default)]
pub struct ActionRegistryBuilder {
    encoders: HashMap<ActionKind, ActionEncoder>,
}

impl ActionRegistryBuilder {
    /// Associate `kind` with `encoder`, replacing any previous encoder.
    pub fn register(mut self, kind: ActionKind, encoder: ActionEncoder) -> Self {
        self.encoders.insert(kind, encoder);
        self
    }

    pub fn builtins(self) -> Self {
        self.register(ActionKind::Output, encode_output)
            .register(ActionKind::Group, encode_group)
            .register(ActionKind::SetQueue, encode_set_queue)
            .register(ActionKind::PopVlan, encode_pop_vlan)
    }

    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            encoders: self.encoders,
        }
    }
}

// ── Built-in encoders ───────────────────────────────────────────────

fn record(key: &str, body: Value, order: u32) -> Document {
    let mut doc = Document::new();
    doc.insert(key.to_owned(), body);
    doc.insert("order".to_owned(), Value::from(order));
    doc
}

fn parse_number(kind: ActionKind, raw: &str, what: &str) -> Result<u32, CoreError> {
    raw.parse()
        .map_err(|_| CoreError::MalformedActionExpression {
            expression: format!("{kind}:{raw}"),
            reason: format!("{what} must be a non-negative integer"),
        })
}

/// `output:<port>` → `{"output-action": {"output-node-connector": port}}`
pub fn encode_output(raw: &str, order: u32) -> Result<Document, CoreError> {
    let port = parse_number(ActionKind::Output, raw, "output port")?;
    Ok(record(
        "output-action",
        json!({ "output-node-connector": port }),
        order,
    ))
}

/// `group:<id>` → `{"group-action": {"group-id": id}}`
pub fn encode_group(raw: &str, order: u32) -> Result<Document, CoreError> {
    let group = parse_number(ActionKind::Group, raw, "group id")?;
    Ok(record("group-action", json!({ "group-id": group }), order))
}

/// `set-queue:<id>` → `{"set-queue-action": {"queue-id": id}}`
pub fn encode_set_queue(raw: &str, order: u32) -> Result<Document, CoreError> {
    let queue = parse_number(ActionKind::SetQueue, raw, "queue id")?;
    Ok(record("set-queue-action", json!({ "queue-id": queue }), order))
}

/// `pop-vlan:` → `{"pop-vlan-action": {}}`; the value is ignored.
#[allow(clippy::unnecessary_wraps)]
pub fn encode_pop_vlan(_raw: &str, order: u32) -> Result<Document, CoreError> {
    Ok(record("pop-vlan-action", json!({}), order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn output_builds_wire_record() {
        let registry = ActionRegistry::with_builtins();
        let rec = registry.build("output", "3", 2).unwrap();
        assert_eq!(
            Value::Object(rec),
            json!({ "output-action": { "output-node-connector": 3 }, "order": 2 })
        );
    }

    #[test]
    fn output_rejects_non_integer_port() {
        let registry = ActionRegistry::with_builtins();
        let err = registry.build("output", "CONTROLLER", 0).unwrap_err();
        assert!(
            matches!(err, CoreError::MalformedActionExpression { ref expression, .. } if expression == "output:CONTROLLER"),
            "got: {err:?}"
        );
    }

    #[test]
    fn unknown_keyword() {
        let registry = ActionRegistry::with_builtins();
        let err = registry.build("flood", "1", 0).unwrap_err();
        assert!(matches!(err, CoreError::UnknownActionKind { ref keyword } if keyword == "flood"));
    }

    #[test]
    fn known_kind_without_encoder_is_unknown() {
        let registry = ActionRegistry::builder()
            .register(ActionKind::Output, encode_output)
            .build();
        assert!(matches!(
            registry.build("group", "1", 0),
            Err(CoreError::UnknownActionKind { .. })
        ));
        assert_eq!(registry.kinds(), vec![ActionKind::Output]);
    }

    #[test]
    fn register_overwrites() {
        fn fixed(_raw: &str, order: u32) -> Result<Document, CoreError> {
            Ok(record("output-action", json!({ "output-node-connector": 99 }), order))
        }
        let registry = ActionRegistry::builder()
            .builtins()
            .register(ActionKind::Output, fixed)
            .build();
        let rec = registry.build("output", "1", 0).unwrap();
        assert_eq!(rec["output-action"]["output-node-connector"], json!(99));
    }

    #[test]
    fn kebab_case_keywords() {
        let registry = ActionRegistry::with_builtins();
        assert!(registry.build("set-queue", "4", 0).is_ok());
        let rec = registry.build("pop-vlan", "", 1).unwrap();
        assert_eq!(
            Value::Object(rec),
            json!({ "pop-vlan-action": {}, "order": 1 })
        );
        assert_eq!(ActionKind::SetQueue.to_string(), "set-queue");
    }
}
