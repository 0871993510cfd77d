// ── Match codec ──
//
// Discrete match options → match document, and back to a one-line summary.
// Only supplied options produce keys; an empty document matches all.

use serde_json::{Value, json};

use super::{MatchDocument, render_record};
use crate::error::CoreError;

/// Mask applied when a MAC expression carries no `/mask` part.
pub const EXACT_MAC_MASK: &str = "ff:ff:ff:ff:ff:ff";

/// Match conditions as typed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Input port, passed through as given (`"1"`, `"openflow:1:1"`).
    pub in_port: Option<String>,
    /// `ADDRESS` or `ADDRESS/MASK`.
    pub dl_src: Option<String>,
    /// `ADDRESS` or `ADDRESS/MASK`.
    pub dl_dst: Option<String>,
    pub tunnel_id: Option<u64>,
}

impl MatchOptions {
    pub fn is_empty(&self) -> bool {
        self.in_port.is_none()
            && self.dl_src.is_none()
            && self.dl_dst.is_none()
            && self.tunnel_id.is_none()
    }
}

/// Split `ADDRESS[/MASK]` into address and mask. Both sides are passed
/// through unmodified; the controller validates the octets.
pub fn parse_mac_expression(expression: &str) -> Result<(String, String), CoreError> {
    let malformed = || CoreError::MalformedAddressExpression {
        expression: expression.to_owned(),
    };

    let mut parts = expression.split('/');
    let address = parts.next().unwrap_or_default();
    let mask = parts.next();
    if parts.next().is_some() || address.is_empty() {
        return Err(malformed());
    }
    match mask {
        None => Ok((address.to_owned(), EXACT_MAC_MASK.to_owned())),
        Some("") => Err(malformed()),
        Some(mask) => Ok((address.to_owned(), mask.to_owned())),
    }
}

fn address_entry(expression: &str) -> Result<Value, CoreError> {
    let (address, mask) = parse_mac_expression(expression)?;
    Ok(json!({ "address": address, "mask": mask }))
}

/// Build a match document from the supplied options.
pub fn encode(options: &MatchOptions) -> Result<MatchDocument, CoreError> {
    let mut document = MatchDocument::new();

    if let Some(port) = &options.in_port {
        document.insert("in-port", Value::from(port.as_str()));
    }

    if options.dl_src.is_some() || options.dl_dst.is_some() {
        let mut ethernet = serde_json::Map::new();
        if let Some(src) = &options.dl_src {
            ethernet.insert("ethernet-source".into(), address_entry(src)?);
        }
        if let Some(dst) = &options.dl_dst {
            ethernet.insert("ethernet-destination".into(), address_entry(dst)?);
        }
        document.insert("ethernet-match", Value::Object(ethernet));
    }

    if let Some(tunnel_id) = options.tunnel_id {
        document.insert("tunnel", json!({ "tunnel-id": tunnel_id }));
    }

    Ok(document)
}

/// Render a match document as `key: json, key: json`. Empty means "match all".
pub fn decode(document: &MatchDocument) -> String {
    render_record(document.as_document())
}
