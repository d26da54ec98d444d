//! Data objects, abstract (base) types and `anyType` values.
//!
//! Every generated struct implements [`WireType`]. Positions declared with an
//! abstract wire type hold a generated enum implementing [`AbstractType`],
//! and `xsd:anyType` positions hold an [`AnyType`]. Both reach the concrete
//! value through the object-safe [`DataObject`] view.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::codec::{
    decode_struct, encode_struct, Decode, Decoder, Encode, Encoder, StructReader, StructWriter,
};
use crate::discriminator;
use crate::error::{DecodeError, EncodeError};
use crate::node::Node;
use crate::primitive::{Binary, Primitive, PrimitiveKind, PrimitiveType};

/// A concrete wire structure.
pub trait WireType: Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Wire name used when the type is registered without an explicit name,
    /// and as the last-resort discriminator when it is not registered at all.
    fn wire_name() -> Cow<'static, str> {
        Cow::Borrowed(short_type_name(std::any::type_name::<Self>()))
    }

    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError>;

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError>;

    /// Custom encoding tried before the field walk. `None` skips it.
    fn encode_hook(&self, _enc: &Encoder<'_>) -> Option<Result<Node, EncodeError>> {
        None
    }

    /// Custom decoding tried before the field walk. `None` skips it.
    fn decode_hook(_node: &Node, _de: &mut Decoder<'_>) -> Option<Result<Self, DecodeError>> {
        None
    }
}

/// Object-safe view of any [`WireType`].
pub trait DataObject: Any + fmt::Debug + Send + Sync {
    fn default_wire_name(&self) -> Cow<'static, str>;

    fn rust_type_name(&self) -> &'static str;

    fn encode_object(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError>;

    fn clone_object(&self) -> Box<dyn DataObject>;

    fn eq_object(&self, other: &dyn DataObject) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: WireType> DataObject for T {
    fn default_wire_name(&self) -> Cow<'static, str> {
        T::wire_name()
    }

    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn encode_object(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        encode_struct(self, enc)
    }

    fn clone_object(&self) -> Box<dyn DataObject> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn DataObject) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn DataObject {
    pub fn concrete_type_id(&self) -> TypeId {
        Any::type_id(self.as_any())
    }

    pub fn is<T: DataObject>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: DataObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: DataObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl Clone for Box<dyn DataObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

impl PartialEq for dyn DataObject {
    fn eq(&self, other: &Self) -> bool {
        self.eq_object(other)
    }
}

// Works around rust-lang/rust#31740 so `Box<dyn DataObject>` values can be
// compared with `==`/`assert_eq!` without moving out of a reference.
impl PartialEq<&Self> for Box<dyn DataObject> {
    fn eq(&self, other: &&Self) -> bool {
        self.eq_object(other.as_ref())
    }
}

/// Moves the concrete value out of a boxed object. `None` when the box
/// holds some other type.
pub fn into_concrete<T: DataObject>(object: Box<dyn DataObject>) -> Option<T> {
    object.into_any().downcast::<T>().ok().map(|value| *value)
}

/// An abstract wire type: a closed set of concrete variants sharing a base.
pub trait AbstractType: Sized {
    /// Wire name of the base type.
    const BASE_NAME: &'static str;

    fn as_object(&self) -> &dyn DataObject;

    fn from_object(object: Box<dyn DataObject>) -> Option<Self>;
}

/// An `xsd:anyType` value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyType {
    Primitive(Primitive),
    Object(Box<dyn DataObject>),
}

impl AnyType {
    pub fn object<T: WireType>(value: T) -> Self {
        AnyType::Object(Box::new(value))
    }

    /// Wraps a list in its `ArrayOf` holder, as slices in `anyType` positions
    /// travel on the wire.
    pub fn array<T: ArrayElement>(items: Vec<T>) -> Self {
        AnyType::Object(Box::new(ArrayOf::new(items)))
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            AnyType::Primitive(value) => Some(value),
            AnyType::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&dyn DataObject> {
        match self {
            AnyType::Primitive(_) => None,
            AnyType::Object(object) => Some(object.as_ref()),
        }
    }

    pub fn downcast_ref<T: DataObject>(&self) -> Option<&T> {
        self.as_object().and_then(|object| object.downcast_ref::<T>())
    }

    /// The items of an `ArrayOf<T>` wrapper.
    pub fn as_array<T: ArrayElement>(&self) -> Option<&[T]> {
        self.downcast_ref::<ArrayOf<T>>()
            .map(|array| array.items.as_slice())
    }

    /// Extracts a primitive of a specific Rust type.
    pub fn to_primitive<T: PrimitiveType>(&self) -> Option<T> {
        self.as_primitive()
            .cloned()
            .and_then(T::from_primitive)
    }
}

impl From<Primitive> for AnyType {
    fn from(value: Primitive) -> Self {
        AnyType::Primitive(value)
    }
}

impl From<Box<dyn DataObject>> for AnyType {
    fn from(object: Box<dyn DataObject>) -> Self {
        AnyType::Object(object)
    }
}

macro_rules! any_from_primitive {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for AnyType {
                fn from(value: $ty) -> Self {
                    AnyType::Primitive(value.into_primitive())
                }
            }
        )+
    };
}

any_from_primitive!(bool, u8, i16, i32, i64, f32, f64, String, Binary, DateTime<Utc>);

impl From<&str> for AnyType {
    fn from(value: &str) -> Self {
        AnyType::Primitive(Primitive::String(value.to_owned()))
    }
}

impl Encode for AnyType {
    fn encode(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        discriminator::encode_any(self, enc)
    }
}

impl Decode for AnyType {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        discriminator::decode_any(node, de)
    }
}

/// A type that can be the element of an `ArrayOf` wrapper.
pub trait ArrayElement:
    Encode + Decode + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Element name of each item (XML) and the wire name of the element type.
    const ELEMENT_NAME: &'static str;

    /// Wire name of the wrapper, `ArrayOf<ElementName>`.
    const ARRAY_NAME: &'static str;
}

macro_rules! primitive_array_element {
    ($($ty:ty => $kind:ident);+ $(;)?) => {
        $(
            impl ArrayElement for $ty {
                const ELEMENT_NAME: &'static str = PrimitiveKind::$kind.wire_name();
                const ARRAY_NAME: &'static str = PrimitiveKind::$kind.array_name();
            }
        )+
    };
}

primitive_array_element! {
    bool => Boolean;
    u8 => Byte;
    i16 => Short;
    i32 => Int;
    i64 => Long;
    f32 => Float;
    f64 => Double;
    String => String;
    Binary => Binary;
    DateTime<Utc> => DateTime;
}

/// The `ArrayOf<X>` holder that carries a list through an `anyType` position.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayOf<T> {
    pub items: Vec<T>,
}

impl<T> ArrayOf<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> Default for ArrayOf<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: ArrayElement> WireType for ArrayOf<T> {
    fn wire_name() -> Cow<'static, str> {
        Cow::Borrowed(T::ARRAY_NAME)
    }

    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.items(T::ELEMENT_NAME, &self.items)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            items: r.items(T::ELEMENT_NAME)?,
        })
    }
}

impl<T: ArrayElement> Encode for ArrayOf<T> {
    fn encode(&self, enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        encode_struct(self, enc)
    }
}

impl<T: ArrayElement> Decode for ArrayOf<T> {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decode_struct(node, de)
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}

/// Strips the module path from a Rust type name. Generic names keep their
/// arguments and so never pass [`is_wire_name`].
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    let start = head.rfind("::").map_or(0, |index| index + 2);
    &full[start..]
}

/// Whether `name` can appear as a discriminator: an XML NCName restricted to
/// ASCII identifier characters.
pub fn is_wire_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}
