//! JSON wire format.
//!
//! Every data object is a JSON object whose first key is `_typeName`.
//! Primitives in `anyType` positions travel in an envelope,
//! `{"_typeName": "short", "_value": 300}`, and array wrappers keep their
//! items under `_value`.

mod reader;
mod writer;

use serde_json::Value;

use crate::codec::{Decode, Decoder, Encode, Encoder};
use crate::constants::WireFormat;
use crate::error::{DecodeError, EncodeError};
use crate::node::Node;
use crate::registry::Registry;

pub use reader::node_from_value;
pub use writer::JsonNode;

#[derive(Debug, Clone, Default)]
pub struct JsonOptions {
    /// Two-space indented output.
    pub pretty: bool,
}

pub fn encode_node<T: Encode + ?Sized>(value: &T, registry: &Registry) -> Result<Node, EncodeError> {
    value.encode(&Encoder::new(registry, WireFormat::Json))
}

pub fn decode_node<T: Decode>(node: &Node, registry: &Registry) -> Result<T, DecodeError> {
    T::decode(node, &mut Decoder::new(registry, WireFormat::Json))
}

pub fn node_to_vec(node: &Node, options: &JsonOptions) -> Result<Vec<u8>, EncodeError> {
    let bytes = if options.pretty {
        serde_json::to_vec_pretty(&JsonNode(node))?
    } else {
        serde_json::to_vec(&JsonNode(node))?
    };
    Ok(bytes)
}

pub fn node_from_slice(bytes: &[u8]) -> Result<Node, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(node_from_value(&value))
}

pub fn to_vec<T: Encode + ?Sized>(value: &T, registry: &Registry) -> Result<Vec<u8>, EncodeError> {
    to_vec_with(value, registry, &JsonOptions::default())
}

pub fn to_vec_with<T: Encode + ?Sized>(
    value: &T,
    registry: &Registry,
    options: &JsonOptions,
) -> Result<Vec<u8>, EncodeError> {
    node_to_vec(&encode_node(value, registry)?, options)
}

pub fn to_string<T: Encode + ?Sized>(value: &T, registry: &Registry) -> Result<String, EncodeError> {
    let node = encode_node(value, registry)?;
    Ok(serde_json::to_string(&JsonNode(&node))?)
}

pub fn to_string_pretty<T: Encode + ?Sized>(
    value: &T,
    registry: &Registry,
) -> Result<String, EncodeError> {
    let node = encode_node(value, registry)?;
    Ok(serde_json::to_string_pretty(&JsonNode(&node))?)
}

pub fn to_value<T: Encode + ?Sized>(value: &T, registry: &Registry) -> Result<Value, EncodeError> {
    let node = encode_node(value, registry)?;
    Ok(serde_json::to_value(JsonNode(&node))?)
}

pub fn from_slice<T: Decode>(bytes: &[u8], registry: &Registry) -> Result<T, DecodeError> {
    decode_node(&node_from_slice(bytes)?, registry)
}

pub fn from_str<T: Decode>(text: &str, registry: &Registry) -> Result<T, DecodeError> {
    from_slice(text.as_bytes(), registry)
}

pub fn from_value<T: Decode>(value: &Value, registry: &Registry) -> Result<T, DecodeError> {
    decode_node(&node_from_value(value), registry)
}
