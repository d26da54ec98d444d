//! Conversion of parsed JSON into the node tree.

use serde_json::Value;

use crate::constants::{TYPE_NAME_KEY, VALUE_KEY};
use crate::node::{FieldKind, Node, StructNode};
use crate::primitive::PrimitiveKind;

/// Converts a parsed JSON document. Objects become structures tagged with
/// their `_typeName`; an object whose `_typeName` is a primitive alias and
/// which carries `_value` becomes a tagged scalar.
pub fn node_from_value(value: &Value) -> Node {
    match value {
        Value::Null => Node::Null,
        Value::Bool(value) => Node::Bool(*value),
        Value::Number(value) => Node::Number(value.clone()),
        Value::String(value) => Node::Text(value.clone()),
        Value::Array(items) => Node::List(items.iter().map(node_from_value).collect()),
        Value::Object(map) => {
            let type_name = map.get(TYPE_NAME_KEY).and_then(Value::as_str);
            if let (Some(name), Some(inner)) = (type_name, map.get(VALUE_KEY)) {
                if PrimitiveKind::from_wire_name(name).is_some() {
                    return Node::tagged(name, node_from_value(inner));
                }
            }
            let mut node = StructNode::new(type_name.map(str::to_owned));
            for (key, value) in map {
                if key != TYPE_NAME_KEY {
                    node.push(key.as_str(), FieldKind::Element, node_from_value(value));
                }
            }
            Node::Struct(node)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitive_envelopes_become_tagged_scalars() {
        let node = node_from_value(&json!({"_typeName": "short", "_value": 300}));
        assert_eq!(node, Node::tagged("short", Node::Number(300.into())));
    }

    #[test]
    fn objects_keep_their_type_name_and_key_order() {
        let node = node_from_value(&json!({
            "_typeName": "ArrayOfString",
            "_value": ["a", "b"],
        }));
        let Node::Struct(node) = node else {
            panic!("expected a structure");
        };
        assert_eq!(node.type_name.as_deref(), Some("ArrayOfString"));
        assert_eq!(node.fields.len(), 1);
        assert_eq!(node.fields[0].name, "_value");
    }

    #[test]
    fn untyped_objects_have_no_discriminator() {
        let node = node_from_value(&json!({"key": 1}));
        assert_eq!(node.discriminator(), None);
    }
}
