// ── Flow rule ──

use serde::Serialize;
use serde_json::Value;

use super::document::Fields;
use crate::codec::{InstructionCodec, InstructionDocument, MatchDocument, match_codec};
use crate::error::CoreError;

/// OpenFlow priority assumed when a flow document omits one.
pub const DEFAULT_PRIORITY: u32 = 32768;

/// One flow rule within a table.
///
/// `match_` and `instructions` stay in wire form; render them with
/// [`Flow::match_summary`] and [`Flow::instruction_summary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
    pub id: String,
    pub table_id: Option<u32>,
    pub priority: u32,
    pub flow_name: Option<String>,
    #[serde(rename = "match")]
    pub match_: MatchDocument,
    /// `None` means the flow drops matching packets.
    pub instructions: Option<InstructionDocument>,
    pub hard_timeout: Option<u32>,
    pub idle_timeout: Option<u32>,
    pub barrier: Option<bool>,
    pub strict: Option<bool>,
    pub cookie: Option<u64>,
    pub statistics: Option<Value>,
}

impl Flow {
    pub fn from_document(doc: &Value) -> Result<Self, CoreError> {
        let f = Fields::new("Flow", doc)?;
        Ok(Self {
            id: f.required_string("id")?,
            table_id: f.optional_u32(&["table_id", "table-id"]),
            priority: f.optional_u32(&["priority"]).unwrap_or(DEFAULT_PRIORITY),
            flow_name: f.optional_string(&["flow-name", "flow_name"]),
            match_: f
                .optional_object("match")
                .map(MatchDocument::from)
                .unwrap_or_default(),
            instructions: f.optional_object("instructions").map(InstructionDocument::from),
            hard_timeout: f.optional_u32(&["hard-timeout", "hard_timeout"]),
            idle_timeout: f.optional_u32(&["idle-timeout", "idle_timeout"]),
            barrier: f.optional_bool(&["barrier"]),
            strict: f.optional_bool(&["strict"]),
            cookie: f.optional_u64(&["cookie"]),
            statistics: f.optional(&["opendaylight-flow-statistics:flow-statistics"]),
        })
    }

    /// `key: json` per match condition; empty for a match-all flow.
    pub fn match_summary(&self) -> String {
        match_codec::decode(&self.match_)
    }

    /// Ordered action summary, or `Drop` without instructions.
    pub fn instruction_summary(&self) -> String {
        InstructionCodec::decode(self.instructions.as_ref())
    }
}
