//! [`Node`] to typed value decoding.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::constants::{WireFormat, VALUE_KEY};
use crate::error::DecodeError;
use crate::node::{FieldKind, Node, StructNode};
use crate::object::WireType;
use crate::primitive::{
    parse_base64, parse_bool, parse_date_time, parse_float, Binary, ByteSlice, Primitive,
    PrimitiveKind,
};
use crate::registry::Registry;

pub trait Decode: Sized {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError>;

    /// Builds the value from every occurrence of a field. Scalars keep the
    /// last occurrence; lists gather all of them.
    fn decode_occurrences(nodes: &[&Node], de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match nodes.last() {
            Some(node) => Self::decode(node, de),
            None => Self::absent().ok_or_else(|| DecodeError::MissingValue { path: de.path() }),
        }
    }

    /// Value taken when the field is missing. `None` makes the field required.
    fn absent() -> Option<Self> {
        None
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Decoding context: the registry used to resolve discriminators, the source
/// format, and the path of the value being decoded.
#[derive(Debug)]
pub struct Decoder<'r> {
    registry: &'r Registry,
    format: WireFormat,
    path: Vec<Segment>,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry, format: WireFormat) -> Self {
        Self {
            registry,
            format,
            path: Vec::new(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    pub fn decode<T: Decode>(&mut self, node: &Node) -> Result<T, DecodeError> {
        T::decode(node, self)
    }

    /// Location of the value being decoded, as `$.field[index]`.
    pub fn path(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            let _ = match segment {
                Segment::Field(name) => write!(out, ".{name}"),
                Segment::Index(index) => write!(out, "[{index}]"),
            };
        }
        out
    }

    pub fn mismatch(&self, expected: impl Into<String>, found: &Node) -> DecodeError {
        DecodeError::TypeMismatch {
            expected: expected.into(),
            found: found.describe().to_owned(),
            path: self.path(),
        }
    }

    pub(crate) fn field_scope<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        self.path.push(Segment::Field(name.to_owned()));
        let result = f(self);
        self.path.pop();
        result
    }

    pub(crate) fn index_scope<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        self.path.push(Segment::Index(index));
        let result = f(self);
        self.path.pop();
        result
    }

    fn invalid(&self, kind: PrimitiveKind, text: &str) -> DecodeError {
        DecodeError::InvalidScalar {
            kind: kind.wire_name(),
            text: text.to_owned(),
            path: self.path(),
        }
    }

    fn out_of_range(&self, kind: PrimitiveKind, value: impl ToString) -> DecodeError {
        DecodeError::OutOfRange {
            kind: kind.wire_name(),
            value: value.to_string(),
            path: self.path(),
        }
    }
}

/// Reads the fields of one structure.
pub struct StructReader<'n, 'd, 'r> {
    node: &'n StructNode,
    de: &'d mut Decoder<'r>,
}

impl<'n, 'd, 'r> StructReader<'n, 'd, 'r> {
    pub(crate) fn new(node: &'n StructNode, de: &'d mut Decoder<'r>) -> Self {
        Self { node, de }
    }

    /// The discriminator the structure arrived with, if any.
    pub fn type_name(&self) -> Option<&'n str> {
        self.node.type_name.as_deref()
    }

    pub fn decoder(&mut self) -> &mut Decoder<'r> {
        self.de
    }

    /// Reads an element. Missing fields take [`Decode::absent`], or fail
    /// when the type has no absent value.
    pub fn field<T: Decode>(&mut self, name: &str) -> Result<T, DecodeError> {
        let node = self.node;
        let occurrences = node.occurrences(name);
        self.read(name, &occurrences, T::absent)
    }

    /// Reads an element that must be present.
    pub fn required<T: Decode>(&mut self, name: &str) -> Result<T, DecodeError> {
        let node = self.node;
        let occurrences = node.occurrences(name);
        self.read(name, &occurrences, || None)
    }

    pub fn attribute<T: Decode>(&mut self, name: &str) -> Result<T, DecodeError> {
        self.field(name)
    }

    /// Reads the character data of the element, or the `name` key in JSON.
    pub fn text<T: Decode>(&mut self, name: &str) -> Result<T, DecodeError> {
        let node = self.node;
        let occurrences: Vec<&Node> = match node.text() {
            Some(text) => vec![text],
            None => node.occurrences(name),
        };
        self.read(name, &occurrences, T::absent)
    }

    /// Reads the payload of an array wrapper.
    pub fn items<T: Decode>(&mut self, name: &str) -> Result<Vec<T>, DecodeError> {
        let node = self.node;
        let mut occurrences = node.occurrences(name);
        occurrences.extend(node.occurrences(VALUE_KEY));
        self.read(name, &occurrences, || Some(Vec::new()))
    }

    fn read<T: Decode>(
        &mut self,
        name: &str,
        occurrences: &[&Node],
        absent: impl FnOnce() -> Option<T>,
    ) -> Result<T, DecodeError> {
        if occurrences.is_empty() {
            return absent().ok_or_else(|| DecodeError::MissingField {
                field: name.to_owned(),
                path: self.de.path(),
            });
        }
        self.de
            .field_scope(name, |de| T::decode_occurrences(occurrences, de))
    }
}

/// Decodes a structure: the type's hook first, the field walk when the hook
/// declines. If the hook fails the field walk is tried once; should that
/// fail too, the hook's error is the one reported.
pub fn decode_struct<T: WireType>(node: &Node, de: &mut Decoder<'_>) -> Result<T, DecodeError> {
    match T::decode_hook(node, de) {
        None => read_fields(node, de),
        Some(Ok(value)) => Ok(value),
        Some(Err(hook_error)) => read_fields(node, de).map_err(|_| hook_error),
    }
}

fn read_fields<T: WireType>(node: &Node, de: &mut Decoder<'_>) -> Result<T, DecodeError> {
    match node.untagged() {
        Node::Struct(fields) => T::read_fields(&mut StructReader::new(fields, de)),
        // A leaf element: only character data, no attributes or children.
        Node::Text(text) if de.format() == WireFormat::Xml => {
            let mut leaf = StructNode::default();
            if !text.trim().is_empty() {
                leaf.push("", FieldKind::Text, Node::Text(text.clone()));
            }
            T::read_fields(&mut StructReader::new(&leaf, de))
        }
        other => Err(de.mismatch(T::wire_name(), other)),
    }
}

fn integer(node: &Node, kind: PrimitiveKind, de: &Decoder<'_>) -> Result<i64, DecodeError> {
    match node.untagged() {
        Node::Value(value) => value.as_i64().ok_or_else(|| de.mismatch(kind.wire_name(), node)),
        Node::Number(number) => number
            .as_i64()
            .ok_or_else(|| de.invalid(kind, &number.to_string())),
        Node::Text(text) => text.trim().parse().map_err(|_| de.invalid(kind, text)),
        other => Err(de.mismatch(kind.wire_name(), other)),
    }
}

fn float(node: &Node, kind: PrimitiveKind, de: &Decoder<'_>) -> Result<f64, DecodeError> {
    match node.untagged() {
        Node::Value(value) => value.as_f64().ok_or_else(|| de.mismatch(kind.wire_name(), node)),
        Node::Number(number) => number
            .as_f64()
            .ok_or_else(|| de.invalid(kind, &number.to_string())),
        Node::Text(text) => parse_float(text).ok_or_else(|| de.invalid(kind, text)),
        other => Err(de.mismatch(kind.wire_name(), other)),
    }
}

fn text<'a>(node: &'a Node, kind: PrimitiveKind, de: &Decoder<'_>) -> Result<&'a str, DecodeError> {
    match node.untagged() {
        Node::Text(text) => Ok(text),
        Node::Value(Primitive::String(text)) => Ok(text),
        other => Err(de.mismatch(kind.wire_name(), other)),
    }
}

impl Decode for bool {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let kind = PrimitiveKind::Boolean;
        match node.untagged() {
            Node::Bool(value) | Node::Value(Primitive::Boolean(value)) => Ok(*value),
            Node::Text(text) => parse_bool(text).ok_or_else(|| de.invalid(kind, text)),
            other => Err(de.mismatch(kind.wire_name(), other)),
        }
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

/// Accepts both the signed (`xsd:byte`) and unsigned forms of a byte and
/// keeps the bit pattern.
impl Decode for u8 {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let kind = PrimitiveKind::Byte;
        if let Node::Value(Primitive::Byte(value)) = node.untagged() {
            return Ok(*value);
        }
        let value = integer(node, kind, de)?;
        if (-128..=255).contains(&value) {
            Ok(value as u8)
        } else {
            Err(de.out_of_range(kind, value))
        }
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

macro_rules! decode_integer {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
                    let kind = PrimitiveKind::$kind;
                    let value = integer(node, kind, de)?;
                    <$ty>::try_from(value).map_err(|_| de.out_of_range(kind, value))
                }

                fn absent() -> Option<Self> {
                    Some(0)
                }
            }
        )+
    };
}

decode_integer! {
    i16 => Short,
    i32 => Int,
    i64 => Long,
}

impl Decode for f32 {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        if let Node::Value(Primitive::Float(value)) = node.untagged() {
            return Ok(*value);
        }
        float(node, PrimitiveKind::Float, de).map(|value| value as f32)
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

impl Decode for f64 {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        float(node, PrimitiveKind::Double, de)
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

impl Decode for String {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        text(node, PrimitiveKind::String, de).map(str::to_owned)
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

impl Decode for Binary {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let kind = PrimitiveKind::Binary;
        if let Node::Value(Primitive::Binary(bytes)) = node.untagged() {
            return Ok(Binary(bytes.clone()));
        }
        let encoded = text(node, kind, de)?;
        parse_base64(encoded)
            .map(Binary)
            .ok_or_else(|| de.invalid(kind, encoded))
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

impl Decode for DateTime<Utc> {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let kind = PrimitiveKind::DateTime;
        if let Node::Value(Primitive::DateTime(value)) = node.untagged() {
            return Ok(*value);
        }
        let encoded = text(node, kind, de)?;
        parse_date_time(encoded).ok_or_else(|| de.invalid(kind, encoded))
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

impl Decode for ByteSlice {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Vec::<u8>::decode(node, de).map(ByteSlice)
    }

    fn decode_occurrences(nodes: &[&Node], de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Vec::<u8>::decode_occurrences(nodes, de).map(ByteSlice)
    }

    fn absent() -> Option<Self> {
        Some(ByteSlice::default())
    }
}

impl Primitive {
    /// Decodes `node` as the primitive of the given kind.
    pub fn decode_as(
        kind: PrimitiveKind,
        node: &Node,
        de: &mut Decoder<'_>,
    ) -> Result<Primitive, DecodeError> {
        Ok(match kind {
            PrimitiveKind::Boolean => Primitive::Boolean(de.decode(node)?),
            PrimitiveKind::Byte => Primitive::Byte(de.decode(node)?),
            PrimitiveKind::Short => Primitive::Short(de.decode(node)?),
            PrimitiveKind::Int => Primitive::Int(de.decode(node)?),
            PrimitiveKind::Long => Primitive::Long(de.decode(node)?),
            PrimitiveKind::Float => Primitive::Float(de.decode(node)?),
            PrimitiveKind::Double => Primitive::Double(de.decode(node)?),
            PrimitiveKind::String => Primitive::String(de.decode(node)?),
            PrimitiveKind::Binary => Primitive::Binary(de.decode::<Binary>(node)?.0),
            PrimitiveKind::DateTime => Primitive::DateTime(de.decode(node)?),
        })
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Self::decode_occurrences(&[node], de)
    }

    /// Each occurrence contributes its items: a list node is flattened, a
    /// null contributes nothing, anything else is one item.
    fn decode_occurrences(nodes: &[&Node], de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut items = Vec::new();
        for node in nodes {
            match node {
                Node::List(list) => {
                    for item in list {
                        let index = items.len();
                        items.push(de.index_scope(index, |de| T::decode(item, de))?);
                    }
                }
                Node::Null => {}
                single => {
                    let index = items.len();
                    items.push(de.index_scope(index, |de| T::decode(single, de))?);
                }
            }
        }
        Ok(items)
    }

    fn absent() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match node {
            Node::Null => Ok(None),
            other => T::decode(other, de).map(Some),
        }
    }

    fn decode_occurrences(nodes: &[&Node], de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        if nodes.iter().all(|node| matches!(node, Node::Null)) {
            return Ok(None);
        }
        T::decode_occurrences(nodes, de).map(Some)
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        T::decode(node, de).map(Box::new)
    }

    fn decode_occurrences(nodes: &[&Node], de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        T::decode_occurrences(nodes, de).map(Box::new)
    }

    fn absent() -> Option<Self> {
        T::absent().map(Box::new)
    }
}
