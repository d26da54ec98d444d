//! Typed value to [`Node`] encoding.

use std::any::TypeId;

use chrono::{DateTime, Utc};

use crate::constants::WireFormat;
use crate::discriminator;
use crate::error::EncodeError;
use crate::node::{FieldKind, Node, StructNode};
use crate::object::WireType;
use crate::primitive::{Binary, ByteSlice, Primitive};
use crate::registry::Registry;

pub trait Encode {
    fn encode(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError>;

    /// Whether the value is left out of its parent entirely (an unset
    /// optional, an empty list).
    fn is_absent(&self) -> bool {
        false
    }

    /// Whether the value is the zero value that `omit_empty` fields skip.
    fn is_zero(&self) -> bool {
        self.is_absent()
    }
}

/// Encoding context: the registry used to name types and the target format.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'r> {
    registry: &'r Registry,
    format: WireFormat,
}

impl<'r> Encoder<'r> {
    pub fn new(registry: &'r Registry, format: WireFormat) -> Self {
        Self { registry, format }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    pub fn encode<T: Encode + ?Sized>(&self, value: &T) -> Result<Node, EncodeError> {
        value.encode(self)
    }

    /// Wire name of `T` under this encoder's registry.
    pub fn type_name_of<T: WireType>(&self) -> Result<String, EncodeError> {
        discriminator::wire_name(
            self.registry,
            TypeId::of::<T>(),
            std::any::type_name::<T>(),
            &T::wire_name(),
        )
    }
}

/// Collects the fields of one structure in declaration order.
pub struct StructWriter<'a, 'r> {
    enc: &'a Encoder<'r>,
    node: StructNode,
}

impl<'a, 'r> StructWriter<'a, 'r> {
    pub(crate) fn new(enc: &'a Encoder<'r>, type_name: String) -> Self {
        Self {
            enc,
            node: StructNode::new(Some(type_name)),
        }
    }

    pub fn encoder(&self) -> &'a Encoder<'r> {
        self.enc
    }

    /// Writes an element unless the value is absent.
    pub fn field<T: Encode + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), EncodeError> {
        if value.is_absent() {
            return Ok(());
        }
        let node = value.encode(self.enc)?;
        self.node.push(name, FieldKind::Element, node);
        Ok(())
    }

    /// Writes an element that the decoder requires. An absent value is an
    /// error rather than a silently dropped field.
    pub fn required<T: Encode + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        if value.is_absent() {
            return Err(EncodeError::MissingField {
                field: name.to_owned(),
                type_name: self.node.type_name.clone().unwrap_or_default(),
            });
        }
        self.field(name, value)
    }

    /// Writes an element unless the value is absent or zero.
    pub fn omit_empty<T: Encode + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        if value.is_zero() {
            return Ok(());
        }
        self.field(name, value)
    }

    /// Writes an element, or an explicit nil when the value is unset.
    pub fn nullable<T: Encode>(&mut self, name: &str, value: &Option<T>) -> Result<(), EncodeError> {
        let node = match value {
            Some(value) => value.encode(self.enc)?,
            None => Node::Null,
        };
        self.node.push(name, FieldKind::Element, node);
        Ok(())
    }

    /// Writes a scalar as an XML attribute. Absent and zero values are skipped.
    pub fn attribute<T: Encode + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        if value.is_zero() {
            return Ok(());
        }
        self.scalar(name, FieldKind::Attribute, value)
    }

    /// Writes a scalar as the character data of the element.
    pub fn text<T: Encode + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), EncodeError> {
        if value.is_absent() {
            return Ok(());
        }
        self.scalar(name, FieldKind::Text, value)
    }

    /// Writes the payload of an array wrapper. Always present, even when empty.
    pub fn items<T: Encode>(&mut self, name: &str, items: &[T]) -> Result<(), EncodeError> {
        let nodes = items
            .iter()
            .map(|item| item.encode(self.enc))
            .collect::<Result<Vec<_>, _>>()?;
        self.node.push(name, FieldKind::Items, Node::List(nodes));
        Ok(())
    }

    pub(crate) fn finish(self) -> StructNode {
        self.node
    }

    fn scalar<T: Encode + ?Sized>(
        &mut self,
        name: &str,
        kind: FieldKind,
        value: &T,
    ) -> Result<(), EncodeError> {
        let node = value.encode(self.enc)?;
        if !node.is_scalar() {
            return Err(EncodeError::NotScalar {
                field: name.to_owned(),
                kind: match kind {
                    FieldKind::Attribute => "attribute",
                    _ => "text",
                },
            });
        }
        self.node.push(name, kind, node);
        Ok(())
    }
}

/// Encodes a structure: the type's hook first, the field walk when the hook
/// declines. If the hook fails the field walk is tried once; should that
/// fail too, the hook's error is the one reported.
pub fn encode_struct<T: WireType>(value: &T, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
    match value.encode_hook(enc) {
        None => walk_fields(value, enc),
        Some(Ok(node)) => Ok(node),
        Some(Err(hook_error)) => walk_fields(value, enc).map_err(|_| hook_error),
    }
}

fn walk_fields<T: WireType>(value: &T, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
    let mut writer = StructWriter::new(enc, enc.type_name_of::<T>()?);
    value.write_fields(&mut writer)?;
    Ok(Node::Struct(writer.finish()))
}

macro_rules! encode_primitive {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode(&self, _enc: &Encoder<'_>) -> Result<Node, EncodeError> {
                    Ok(Node::Value(Primitive::$variant(self.clone().into())))
                }

                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )+
    };
}

encode_primitive! {
    bool => Boolean,
    u8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Binary => Binary,
}

impl Encode for str {
    fn encode(&self, _enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        Ok(Node::Value(Primitive::String(self.to_owned())))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for DateTime<Utc> {
    fn encode(&self, _enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        Ok(Node::Value(Primitive::DateTime(*self)))
    }

    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }
}

impl Encode for ByteSlice {
    fn encode(&self, _enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        Ok(Node::List(
            self.0
                .iter()
                .map(|byte| Node::Value(Primitive::Byte(*byte)))
                .collect(),
        ))
    }

    fn is_absent(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        self.iter()
            .map(|item| item.encode(enc))
            .collect::<Result<Vec<_>, _>>()
            .map(Node::List)
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        match self {
            Some(value) => value.encode(enc),
            None => Ok(Node::Null),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, Encode::is_absent)
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        (**self).encode(enc)
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}
