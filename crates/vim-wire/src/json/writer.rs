//! Rendering of the node tree through `serde`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::SecondsFormat;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::constants::{TYPE_NAME_KEY, VALUE_KEY};
use crate::node::{FieldKind, Node, StructNode};
use crate::primitive::Primitive;

/// Serializes a [`Node`] in the JSON wire shape.
pub struct JsonNode<'a>(pub &'a Node);

impl Serialize for JsonNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Node::Null => serializer.serialize_unit(),
            Node::Value(value) => serialize_primitive(value, serializer),
            Node::Bool(value) => serializer.serialize_bool(*value),
            Node::Number(value) => value.serialize(serializer),
            Node::Text(value) => serializer.serialize_str(value),
            Node::List(items) => serializer.collect_seq(items.iter().map(JsonNode)),
            Node::Struct(node) => serialize_struct(node, None, serializer),
            Node::Tagged(name, inner) => match inner.as_ref() {
                Node::Struct(node) => serialize_struct(node, Some(name.as_str()), serializer),
                other => {
                    let mut map = serializer.serialize_map(Some(2))?;
                    map.serialize_entry(TYPE_NAME_KEY, name)?;
                    map.serialize_entry(VALUE_KEY, &JsonNode(other))?;
                    map.end()
                }
            },
        }
    }
}

fn serialize_struct<S: Serializer>(
    node: &StructNode,
    tag: Option<&str>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    if let Some(name) = tag.or(node.type_name.as_deref()) {
        map.serialize_entry(TYPE_NAME_KEY, name)?;
    }
    for field in &node.fields {
        let key = match field.kind {
            FieldKind::Items => VALUE_KEY,
            _ => field.name.as_str(),
        };
        map.serialize_entry(key, &JsonNode(&field.value))?;
    }
    map.end()
}

fn serialize_primitive<S: Serializer>(value: &Primitive, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Primitive::Boolean(v) => serializer.serialize_bool(*v),
        Primitive::Byte(v) => serializer.serialize_i8(*v as i8),
        Primitive::Short(v) => serializer.serialize_i16(*v),
        Primitive::Int(v) => serializer.serialize_i32(*v),
        Primitive::Long(v) => serializer.serialize_i64(*v),
        // JSON has no token for INF, -INF or NaN.
        Primitive::Float(v) if !v.is_finite() => serializer.serialize_str(&value.lexical()),
        Primitive::Double(v) if !v.is_finite() => serializer.serialize_str(&value.lexical()),
        Primitive::Float(v) => serializer.serialize_f32(*v),
        Primitive::Double(v) => serializer.serialize_f64(*v),
        Primitive::String(v) => serializer.serialize_str(v),
        Primitive::Binary(v) => serializer.serialize_str(&STANDARD.encode(v)),
        Primitive::DateTime(v) => {
            serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
    }
}
