//! Discriminator handling shared by both wire formats.
//!
//! A value in an abstract or `anyType` position carries the wire name of its
//! dynamic type. On the way out the name comes from the registry (or, for
//! unregistered types, from the Rust type name); on the way in it is
//! resolved against the registry and then the primitive table.

use std::any::TypeId;

use crate::codec::{Decoder, Encoder};
use crate::error::{DecodeError, EncodeError};
use crate::node::Node;
use crate::object::{is_wire_name, AbstractType, AnyType, DataObject};
use crate::primitive::{Primitive, PrimitiveKind};
use crate::registry::{local_name, Registry, TypeEntry};

/// What a discriminator resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Resolved {
    Object(TypeEntry),
    Primitive(PrimitiveKind),
}

/// Resolves a discriminator: registered types first, then primitive aliases.
pub fn resolve(registry: &Registry, name: &str) -> Option<Resolved> {
    if let Some(entry) = registry.lookup(name) {
        return Some(Resolved::Object(*entry));
    }
    PrimitiveKind::from_wire_name(name).map(Resolved::Primitive)
}

/// The wire name to emit for a concrete type.
pub fn wire_name(
    registry: &Registry,
    type_id: TypeId,
    rust_name: &str,
    default_name: &str,
) -> Result<String, EncodeError> {
    if let Some(name) = registry.type_name_of(type_id) {
        return Ok(name.to_owned());
    }
    if is_wire_name(default_name) {
        return Ok(default_name.to_owned());
    }
    Err(EncodeError::UnresolvedType {
        rust_type: rust_name.to_owned(),
    })
}

/// Encodes a data object with its discriminator attached.
pub fn encode_tagged(object: &dyn DataObject, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
    let name = wire_name(
        enc.registry(),
        object.concrete_type_id(),
        object.rust_type_name(),
        &object.default_wire_name(),
    )?;
    let node = object.encode_object(enc)?;
    Ok(Node::tagged(name, node))
}

pub fn encode_abstract<K: AbstractType>(value: &K, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
    encode_tagged(value.as_object(), enc)
}

pub fn encode_any(value: &AnyType, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
    match value {
        AnyType::Primitive(primitive) => Ok(Node::tagged(
            primitive.wire_name(),
            Node::Value(primitive.clone()),
        )),
        AnyType::Object(object) => encode_tagged(object.as_ref(), enc),
    }
}

/// Decodes a value declared with an abstract type. The discriminator is
/// required and must name one of the abstract type's variants.
pub fn decode_abstract<K: AbstractType>(
    node: &Node,
    de: &mut Decoder<'_>,
) -> Result<K, DecodeError> {
    let Some(name) = node.discriminator() else {
        return Err(DecodeError::MissingDiscriminator {
            expected: K::BASE_NAME.to_owned(),
            path: de.path(),
        });
    };
    let entry = match resolve(de.registry(), name) {
        Some(Resolved::Object(entry)) => entry,
        Some(Resolved::Primitive(kind)) => {
            return Err(DecodeError::TypeMismatch {
                expected: K::BASE_NAME.to_owned(),
                found: kind.wire_name().to_owned(),
                path: de.path(),
            })
        }
        None => return Err(unknown(name, de)),
    };
    let object = entry.decode(node.untagged(), de)?;
    K::from_object(object).ok_or_else(|| DecodeError::TypeMismatch {
        expected: K::BASE_NAME.to_owned(),
        found: local_name(name).to_owned(),
        path: de.path(),
    })
}

/// Decodes an `anyType` value. Tagged values resolve through the registry;
/// bare scalars are accepted and typed from the token itself.
pub fn decode_any(node: &Node, de: &mut Decoder<'_>) -> Result<AnyType, DecodeError> {
    if let Some(name) = node.discriminator() {
        return match resolve(de.registry(), name) {
            Some(Resolved::Object(entry)) => entry.decode(node.untagged(), de).map(AnyType::Object),
            Some(Resolved::Primitive(kind)) => {
                Primitive::decode_as(kind, node.untagged(), de).map(AnyType::Primitive)
            }
            None => Err(unknown(name, de)),
        };
    }
    match node {
        Node::Value(primitive) => Ok(AnyType::Primitive(primitive.clone())),
        Node::Bool(value) => Ok(AnyType::Primitive(Primitive::Boolean(*value))),
        Node::Number(number) => match number.as_i64() {
            Some(value) => Ok(AnyType::Primitive(Primitive::Long(value))),
            None => number
                .as_f64()
                .map(|value| AnyType::Primitive(Primitive::Double(value)))
                .ok_or_else(|| de.mismatch("anyType", node)),
        },
        Node::Text(text) => Ok(AnyType::Primitive(Primitive::String(text.clone()))),
        Node::Struct(_) => Err(DecodeError::MissingDiscriminator {
            expected: "anyType".to_owned(),
            path: de.path(),
        }),
        other => Err(de.mismatch("anyType", other)),
    }
}

fn unknown(name: &str, de: &Decoder<'_>) -> DecodeError {
    DecodeError::UnknownType {
        name: local_name(name).to_owned(),
        path: de.path(),
    }
}
