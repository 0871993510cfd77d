//! Flow-rule codecs.
//!
//! Translate between the compact expressions an operator types
//! (`--actions output:1,group:7`, `--dl-src aa:bb:cc:dd:ee:ff/ff:ff:ff:00:00:00`)
//! and the nested documents the controller stores, and render those
//! documents back into one-line summaries.
//!
//! - [`ActionRegistry`] maps an [`ActionKind`] to a pure encoder function.
//! - [`InstructionCodec`] builds and renders `apply-actions` instruction
//!   documents, assigning and stripping `order` fields.
//! - [`match_codec`] builds and renders match documents.

pub mod action;
pub mod instruction;
pub mod match_codec;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use action::{ActionEncoder, ActionKind, ActionRegistry, ActionRegistryBuilder};
pub use instruction::InstructionCodec;
pub use match_codec::MatchOptions;

/// A JSON object as carried on the wire.
pub type Document = Map<String, Value>;

// ── Document newtypes ───────────────────────────────────────────────

/// Packet-header conditions of a flow. Only populated keys are present;
/// an empty document matches every packet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchDocument(Document);

impl MatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }

    pub(crate) fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_owned(), value);
    }
}

impl From<Document> for MatchDocument {
    fn from(doc: Document) -> Self {
        Self(doc)
    }
}

/// `{"instruction": [...]}` with `order`-tagged instruction records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionDocument(Document);

impl InstructionDocument {
    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }

    /// The instruction records, in document order.
    pub fn instructions(&self) -> &[Value] {
        self.0
            .get("instruction")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl From<Document> for InstructionDocument {
    fn from(doc: Document) -> Self {
        Self(doc)
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// JSON with `", "` and `": "` separators, the way summaries are shown.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Render a value as spaced single-line JSON.
pub fn render_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Render every entry of a record as `key: json-value`, comma-joined.
pub(crate) fn render_record(record: &Document) -> String {
    record
        .iter()
        .map(|(k, v)| format!("{k}: {}", render_json(v)))
        .collect::<Vec<_>>()
        .join(", ")
}
