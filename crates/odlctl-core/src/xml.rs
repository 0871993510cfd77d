// ── JSON document → RESTCONF XML ──
//
// Objects become child elements, arrays become repeated elements of the
// same name, scalars become escaped text and null becomes an empty element.
// Key order is document order.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;

use crate::codec::Document;
use crate::error::CoreError;

/// Serialize `body` as the children of `<root xmlns="namespace">`.
pub fn to_xml(root: &str, namespace: &str, body: &Document) -> Result<String, CoreError> {
    let mut writer = Writer::new(Vec::new());
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut start = BytesStart::new(root);
    start.push_attribute(("xmlns", namespace));
    write(&mut writer, Event::Start(start))?;
    for (key, value) in body {
        write_value(&mut writer, key, value)?;
    }
    write(&mut writer, Event::End(BytesEnd::new(root)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| CoreError::Encoding(e.to_string()))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), CoreError> {
    writer
        .write_event(event)
        .map_err(|e| CoreError::Encoding(e.to_string()))
}

fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_value(writer, name, item)?;
            }
            Ok(())
        }
        Value::Null => write(writer, Event::Empty(BytesStart::new(name))),
        Value::Object(map) if map.is_empty() => write(writer, Event::Empty(BytesStart::new(name))),
        Value::Object(map) => {
            write(writer, Event::Start(BytesStart::new(name)))?;
            for (key, child) in map {
                write_value(writer, key, child)?;
            }
            write(writer, Event::End(BytesEnd::new(name)))
        }
        Value::String(s) => write_text(writer, name, s),
        Value::Bool(b) => write_text(writer, name, &b.to_string()),
        Value::Number(n) => write_text(writer, name, &n.to_string()),
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), CoreError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}
