use base64::Engine;
use scan_api::{Primitive, RawRecord, TaggedValue};

// ═══════════════════════════════════════════════════════════════
//  TaggedValue → JSON conversion
// ═══════════════════════════════════════════════════════════════

/// Convert a tagged store value into a plain JSON value.
///
/// Total: every kind produces a value. Empty records and lists stay
/// `{}` / `[]`. Recursion depth follows the data's own nesting.
pub fn to_plain(value: &TaggedValue) -> serde_json::Value {
    match value {
        TaggedValue::Scalar(p) => primitive_to_plain(p),
        TaggedValue::Record(fields) => {
            let map: serde_json::Map<String, serde_json::Value> = fields
                .iter()
                .map(|(k, v)| (k.clone(), to_plain(v)))
                .collect();
            serde_json::Value::Object(map)
        }
        TaggedValue::List(items) => {
            serde_json::Value::Array(items.iter().map(to_plain).collect())
        }
        TaggedValue::ScalarList(items) => {
            serde_json::Value::Array(items.iter().map(primitive_to_plain).collect())
        }
        TaggedValue::Unrecognized(text) => serde_json::Value::String(text.clone()),
    }
}

/// Normalize every attribute of a record. Key set is exactly the
/// record's attribute set.
pub fn record_to_plain_mapping(record: &RawRecord) -> serde_json::Map<String, serde_json::Value> {
    record
        .attributes()
        .map(|(name, value)| (name.to_string(), to_plain(value)))
        .collect()
}

fn primitive_to_plain(p: &Primitive) -> serde_json::Value {
    match p {
        Primitive::String(s) => serde_json::Value::String(s.clone()),
        Primitive::Number(text) => number_to_plain(text),
        Primitive::Bool(b) => serde_json::Value::Bool(*b),
        Primitive::Binary(bytes) => {
            serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        Primitive::Null => serde_json::Value::Null,
    }
}

/// Decimal text → JSON number. `arbitrary_precision` keeps the parsed
/// number as the store's own text, so 38-digit values and exponent forms
/// are written back unchanged. Text the JSON number grammar rejects
/// (`"NaN"`, `".5"`, `"+1"`) is kept as a string.
fn number_to_plain(text: &str) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Number>(text.trim()) {
        Ok(n) => serde_json::Value::Number(n),
        Err(_) => serde_json::Value::String(text.to_string()),
    }
}
