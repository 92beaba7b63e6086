//! Dynamic field codec: script attributes to and from `{type, value}`
//! document nodes.
//!
//! Each persisted field is a node with an integer `type` tag (the
//! [`FieldKind`] discriminant) and a kind-dependent `value`. Dict and
//! Unserializable fields are deliberate no-ops in both directions: encode
//! writes no node, decode populates nothing. Entity references persist
//! only the UUID string — dangling references are the consumer's problem,
//! never the codec's.

use serde_json::{json, Map, Value};

use crate::script::{DynamicField, FieldKind, FieldValue};

use super::value::{
    decode_vec2, decode_vec3, decode_vec4, encode_vec2, encode_vec3, encode_vec4,
};

/// Encodes a field as a `{type, value}` node, or `None` for the kinds
/// that are never persisted.
pub fn encode_field(field: &DynamicField) -> Option<Value> {
    encode_value(&field.value)
}

fn encode_value(value: &FieldValue) -> Option<Value> {
    let encoded = match value {
        FieldValue::Int(v) => json!(v),
        FieldValue::Float(v) => json!(v),
        FieldValue::String(v) => json!(v),
        FieldValue::List { items, .. } => {
            // Each element becomes a nested field named by its index.
            // Nested lists and dicts degrade to Unserializable tags — one
            // level of nesting only.
            let mut elements = Map::new();
            for (index, item) in items.iter().enumerate() {
                let node = match item.kind() {
                    FieldKind::List | FieldKind::Dict | FieldKind::Unserializable => {
                        json!({ "type": FieldKind::Unserializable.tag() })
                    }
                    kind => match encode_value(item) {
                        Some(value) => json!({ "type": kind.tag(), "value": value }),
                        None => json!({ "type": FieldKind::Unserializable.tag() }),
                    },
                };
                elements.insert(index.to_string(), node);
            }
            let tag = value.kind().tag();
            return Some(json!({ "type": tag, "value": Value::Object(elements) }));
        }
        FieldValue::Dict | FieldValue::Unserializable => return None,
        FieldValue::EntityRef(uuid) => json!(uuid),
        FieldValue::Vector2(v) => encode_vec2(*v),
        FieldValue::Vector3(v) => encode_vec3(*v),
        FieldValue::Vector4(v) => encode_vec4(*v),
    };
    Some(json!({ "type": value.kind().tag(), "value": encoded }))
}

/// Decodes a `{type, value}` node into a named field.
///
/// Returns `None` for Dict and Unserializable tags (nothing to populate)
/// and for unknown tags, which are logged and skipped.
pub fn decode_field(name: &str, node: &Value) -> Option<DynamicField> {
    let tag = node.get("type").and_then(Value::as_i64)?;
    let Some(kind) = FieldKind::from_tag(tag) else {
        log::debug!("field '{name}' has unknown type tag {tag}, skipped");
        return None;
    };
    let value = decode_value(kind, node.get("value").unwrap_or(&Value::Null))?;
    Some(DynamicField::new(name, value))
}

fn decode_value(kind: FieldKind, value: &Value) -> Option<FieldValue> {
    Some(match kind {
        FieldKind::Int => FieldValue::Int(value.as_i64().unwrap_or(0)),
        FieldKind::Float => FieldValue::Float(value.as_f64().unwrap_or(0.0) as f32),
        FieldKind::String => FieldValue::String(value.as_str().unwrap_or_default().to_owned()),
        FieldKind::List => decode_list(value),
        FieldKind::Dict | FieldKind::Unserializable => return None,
        FieldKind::EntityRef => {
            FieldValue::EntityRef(value.as_str().unwrap_or_default().to_owned())
        }
        FieldKind::Vector2 => FieldValue::Vector2(decode_vec2(value)),
        FieldKind::Vector3 => FieldValue::Vector3(decode_vec3(value)),
        FieldKind::Vector4 => FieldValue::Vector4(decode_vec4(value)),
    })
}

fn decode_list(value: &Value) -> FieldValue {
    let mut element = FieldKind::Unserializable;
    let mut items = Vec::new();

    if let Some(entries) = value.as_object() {
        for (index, node) in entries {
            let Some(tag) = node.get("type").and_then(Value::as_i64) else {
                continue;
            };
            match FieldKind::from_tag(tag) {
                Some(FieldKind::Unserializable) => {
                    // Placeholder keeps element arity across the round-trip
                    items.push(FieldValue::Unserializable);
                }
                Some(kind) => {
                    // The homogeneous element kind rides on each element's
                    // own tag; the last one wins when tags disagree.
                    element = kind;
                    if let Some(item) =
                        decode_value(kind, node.get("value").unwrap_or(&Value::Null))
                    {
                        items.push(item);
                    }
                }
                None => {
                    log::debug!("list element '{index}' has unknown type tag {tag}, skipped");
                }
            }
        }
    }

    FieldValue::List { element, items }
}
