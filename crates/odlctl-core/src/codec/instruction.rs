// ── Instruction codec ──
//
// Encode: "output:1,group:7" → one `apply-actions` instruction whose
// actions carry `order` 0..n-1 in textual order.
// Decode: instruction document → "output-action: {...}, group-action: {...}",
// sorted by `order` with the `order` fields stripped.

use serde_json::Value;

use super::action::ActionRegistry;
use super::{Document, InstructionDocument, render_record};
use crate::error::CoreError;

/// Summary shown for a flow without instructions.
pub const DROP: &str = "Drop";

#[derive(Debug, Clone, Default)]
pub struct InstructionCodec {
    registry: ActionRegistry,
}

impl InstructionCodec {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    /// Build an instruction document from a comma-separated action
    /// expression. An absent or blank expression yields `None` (drop).
    pub fn encode(&self, expression: Option<&str>) -> Result<Option<InstructionDocument>, CoreError> {
        let Some(expression) = expression.map(str::trim).filter(|e| !e.is_empty()) else {
            return Ok(None);
        };

        let mut actions = Vec::new();
        for (index, token) in expression.split(',').enumerate() {
            let malformed = |reason: &str| CoreError::MalformedActionExpression {
                expression: token.trim().to_owned(),
                reason: reason.to_owned(),
            };
            let (keyword, raw) = token
                .split_once(':')
                .ok_or_else(|| malformed("expected KIND:VALUE"))?;
            let order = u32::try_from(index).map_err(|_| malformed("too many actions"))?;
            let record = self.registry.build(keyword.trim(), raw.trim(), order)?;
            actions.push(Value::Object(record));
        }

        let mut apply = Document::new();
        apply.insert("action".to_owned(), Value::Array(actions));

        let mut instruction = Document::new();
        instruction.insert("apply-actions".to_owned(), Value::Object(apply));
        instruction.insert("order".to_owned(), Value::from(0));

        let mut document = Document::new();
        document.insert(
            "instruction".to_owned(),
            Value::Array(vec![Value::Object(instruction)]),
        );
        Ok(Some(InstructionDocument::from(document)))
    }

    /// Render an instruction document as a one-line action summary.
    ///
    /// Works on a copy; the caller's document is left untouched.
    pub fn decode(document: Option<&InstructionDocument>) -> String {
        let Some(document) = document else {
            return DROP.to_owned();
        };

        let mut rendered = Vec::new();
        for mut instruction in sorted_records(document.instructions()) {
            instruction.shift_remove("order");
            let actions = instruction
                .get("apply-actions")
                .and_then(|apply| apply.get("action"))
                .and_then(Value::as_array);
            match actions {
                Some(actions) => {
                    for mut action in sorted_records(actions) {
                        action.shift_remove("order");
                        rendered.push(render_record(&action));
                    }
                }
                None => rendered.push(render_record(&instruction)),
            }
        }
        rendered.join(", ")
    }
}

/// Clone the object records out of `values`, ascending by `order`.
/// Records without an order sort last, keeping document order among ties.
fn sorted_records(values: &[Value]) -> Vec<Document> {
    let mut records: Vec<Document> = values
        .iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
    records.sort_by_key(|r| r.get("order").and_then(Value::as_i64).unwrap_or(i64::MAX));
    records
}
