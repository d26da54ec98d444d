//! XML wire format.
//!
//! Struct fields are child elements (or attributes and character data where
//! the type says so), lists repeat their element, and values in abstract or
//! `anyType` positions carry `xsi:type`. Primitive discriminators are written
//! in the `xsd:` namespace.

mod objects;
mod reader;
mod writer;

use crate::codec::{Decode, Decoder, Encode, Encoder};
use crate::constants::WireFormat;
use crate::error::{DecodeError, EncodeError};
use crate::node::Node;
use crate::registry::Registry;

pub use objects::{objects_from_str, objects_to_string, ObjectStream};

#[derive(Debug, Clone, Default)]
pub struct XmlOptions {
    /// Name of the document element. Defaults to the value's wire type.
    pub root: Option<String>,
    /// Indentation width; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Emit an `<?xml ...?>` declaration.
    pub declaration: bool,
}

pub fn encode_node<T: Encode + ?Sized>(value: &T, registry: &Registry) -> Result<Node, EncodeError> {
    value.encode(&Encoder::new(registry, WireFormat::Xml))
}

pub fn decode_node<T: Decode>(node: &Node, registry: &Registry) -> Result<T, DecodeError> {
    T::decode(node, &mut Decoder::new(registry, WireFormat::Xml))
}

/// Renders a node as a document. The root element is `options.root`, or the
/// node's own type name.
pub fn node_to_vec(node: &Node, options: &XmlOptions) -> Result<Vec<u8>, EncodeError> {
    let root = match (&options.root, node.discriminator()) {
        (Some(root), _) => root.clone(),
        (None, Some(name)) => name.to_owned(),
        (None, None) => {
            return Err(EncodeError::MissingRoot {
                found: node.describe(),
            })
        }
    };
    let body = match node {
        // A structure's own name is the root element, not an xsi:type.
        Node::Tagged(_, inner) if options.root.is_none() => inner.as_ref(),
        other => other,
    };
    writer::write_document(&root, body, options)
}

pub fn node_from_str(xml: &str) -> Result<Node, DecodeError> {
    reader::node_from_str(xml)
}

pub fn to_string<T: Encode + ?Sized>(value: &T, registry: &Registry) -> Result<String, EncodeError> {
    to_string_with(value, registry, &XmlOptions::default())
}

pub fn to_string_with<T: Encode + ?Sized>(
    value: &T,
    registry: &Registry,
    options: &XmlOptions,
) -> Result<String, EncodeError> {
    let bytes = to_vec_with(value, registry, options)?;
    String::from_utf8(bytes).map_err(|e| EncodeError::Xml(e.to_string()))
}

pub fn to_vec_with<T: Encode + ?Sized>(
    value: &T,
    registry: &Registry,
    options: &XmlOptions,
) -> Result<Vec<u8>, EncodeError> {
    node_to_vec(&encode_node(value, registry)?, options)
}

pub fn from_str<T: Decode>(xml: &str, registry: &Registry) -> Result<T, DecodeError> {
    decode_node(&node_from_str(xml)?, registry)
}

pub fn from_slice<T: Decode>(bytes: &[u8], registry: &Registry) -> Result<T, DecodeError> {
    let xml = std::str::from_utf8(bytes).map_err(|e| DecodeError::Xml(e.to_string()))?;
    from_str(xml, registry)
}
