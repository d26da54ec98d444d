//! Polymorphic XML and JSON wire codecs for vSphere-style data objects.
//!
//! Values in abstract or `anyType` positions carry a type discriminator
//! (`xsi:type` in XML, `_typeName` in JSON) that is resolved through a
//! [`Registry`] built once at startup. Both formats share one neutral
//! [`Node`] tree and one discriminator implementation.

mod constants;
mod copy;
mod error;
mod macros;
mod node;
mod primitive;

pub mod codec;
pub mod codecs;
pub mod discriminator;
pub mod json;
pub mod object;
pub mod registry;
pub mod xml;

pub use codec::{Decode, Decoder, Encode, Encoder, StructReader, StructWriter};
pub use constants::{
    WireFormat, TYPE_NAME_KEY, VALUE_KEY, VIM25_NAMESPACE, XSD_NAMESPACE, XSI_NAMESPACE,
};
pub use copy::{deep_copy, must_deep_copy};
pub use error::{CopyError, DecodeError, EncodeError, RegistryError};
pub use node::{Field, FieldKind, Node, StructNode};
pub use object::{
    into_concrete, AbstractType, AnyType, ArrayElement, ArrayOf, DataObject, WireType,
};
pub use primitive::{Binary, ByteSlice, Primitive, PrimitiveKind, PrimitiveType};
pub use registry::{Registry, RegistryBuilder, TypeEntry};
