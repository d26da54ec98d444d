//! Type registry: wire name to concrete type, and back.
//!
//! A [`RegistryBuilder`] is filled once at startup (normally by the generated
//! catalog) and frozen into an immutable [`Registry`] that codecs share
//! across threads. Lookups are plain hash-map reads.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use crate::codec::{decode_struct, Decoder};
use crate::error::{DecodeError, RegistryError};
use crate::node::Node;
use crate::object::{is_wire_name, ArrayOf, DataObject, WireType};
use crate::primitive::{Binary, PrimitiveKind};
use chrono::{DateTime, Utc};

pub type DecodeFn = fn(&Node, &mut Decoder<'_>) -> Result<Box<dyn DataObject>, DecodeError>;

/// What the registry knows about one wire name.
#[derive(Clone, Copy)]
pub struct TypeEntry {
    type_id: TypeId,
    rust_name: &'static str,
    decode: DecodeFn,
}

impl TypeEntry {
    pub fn of<T: WireType>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            rust_name: std::any::type_name::<T>(),
            decode: decode_object::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    /// Builds a fresh instance of the entry's type from `node`.
    pub fn decode(
        &self,
        node: &Node,
        de: &mut Decoder<'_>,
    ) -> Result<Box<dyn DataObject>, DecodeError> {
        (self.decode)(node, de)
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeEntry")
            .field("rust_name", &self.rust_name)
            .finish()
    }
}

fn decode_object<T: WireType>(
    node: &Node,
    de: &mut Decoder<'_>,
) -> Result<Box<dyn DataObject>, DecodeError> {
    let value: T = decode_struct(node, de)?;
    Ok(Box::new(value))
}

#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    by_name: HashMap<String, TypeEntry>,
    names: HashMap<TypeId, String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-filled with the `ArrayOf` wrappers of every primitive.
    pub fn with_builtins() -> Self {
        let mut builder = Self::new();
        builder.insert::<ArrayOf<bool>>(PrimitiveKind::Boolean.array_name());
        builder.insert::<ArrayOf<u8>>(PrimitiveKind::Byte.array_name());
        builder.insert::<ArrayOf<i16>>(PrimitiveKind::Short.array_name());
        builder.insert::<ArrayOf<i32>>(PrimitiveKind::Int.array_name());
        builder.insert::<ArrayOf<i64>>(PrimitiveKind::Long.array_name());
        builder.insert::<ArrayOf<f32>>(PrimitiveKind::Float.array_name());
        builder.insert::<ArrayOf<f64>>(PrimitiveKind::Double.array_name());
        builder.insert::<ArrayOf<String>>(PrimitiveKind::String.array_name());
        builder.insert::<ArrayOf<Binary>>(PrimitiveKind::Binary.array_name());
        builder.insert::<ArrayOf<DateTime<Utc>>>(PrimitiveKind::DateTime.array_name());
        builder
    }

    /// Registers `T` under its own wire name.
    pub fn register<T: WireType>(&mut self) -> Result<&mut Self, RegistryError> {
        let name = T::wire_name();
        self.register_as::<T>(&name)
    }

    /// Registers `T` under `name`. A name can be bound only once.
    pub fn register_as<T: WireType>(&mut self, name: &str) -> Result<&mut Self, RegistryError> {
        if !is_wire_name(name) {
            return Err(RegistryError::InvalidName {
                name: name.to_owned(),
            });
        }
        if let Some(existing) = self.by_name.get(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_owned(),
                existing: existing.rust_name,
            });
        }
        self.insert::<T>(name);
        Ok(self)
    }

    /// Rebinds `name` to `T`, returning the entry it replaces so the caller
    /// can put it back with [`RegistryBuilder::restore`].
    pub fn override_type<T: WireType>(&mut self, name: &str) -> Option<TypeEntry> {
        let entry = TypeEntry::of::<T>();
        self.names
            .entry(entry.type_id)
            .or_insert_with(|| name.to_owned());
        let previous = self.by_name.insert(name.to_owned(), entry);
        log::debug!(
            "wire type `{}` now maps to {}",
            name,
            std::any::type_name::<T>()
        );
        previous
    }

    /// Puts back an entry returned by [`RegistryBuilder::override_type`].
    pub fn restore(&mut self, name: &str, entry: Option<TypeEntry>) {
        if let Some(current) = self.by_name.remove(name) {
            if self.names.get(&current.type_id).map(String::as_str) == Some(name) {
                self.names.remove(&current.type_id);
            }
        }
        if let Some(entry) = entry {
            self.names.insert(entry.type_id, name.to_owned());
            self.by_name.insert(name.to_owned(), entry);
        }
    }

    pub fn build(self) -> Registry {
        log::trace!("built wire type registry with {} names", self.by_name.len());
        Registry {
            by_name: self.by_name,
            names: self.names,
        }
    }

    fn insert<T: WireType>(&mut self, name: &str) -> Option<TypeEntry> {
        let entry = TypeEntry::of::<T>();
        self.names.insert(entry.type_id, name.to_owned());
        self.by_name.insert(name.to_owned(), entry)
    }
}

/// Immutable name/type mapping shared by every codec.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_name: HashMap<String, TypeEntry>,
    names: HashMap<TypeId, String>,
}

impl Registry {
    /// Finds the type bound to `name`. A namespace prefix (`vim25:`) is
    /// ignored. Unknown names return `None`.
    pub fn lookup(&self, name: &str) -> Option<&TypeEntry> {
        self.by_name.get(local_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// The wire name a concrete type was registered under.
    pub fn type_name_of(&self, type_id: TypeId) -> Option<&str> {
        self.names.get(&type_id).map(String::as_str)
    }

    pub fn name_of<T: 'static>(&self) -> Option<&str> {
        self.type_name_of(TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn to_builder(&self) -> RegistryBuilder {
        RegistryBuilder {
            by_name: self.by_name.clone(),
            names: self.names.clone(),
        }
    }

    /// A copy of this registry with `name` rebound to `T`.
    pub fn with_override<T: WireType>(&self, name: &str) -> Registry {
        let mut builder = self.to_builder();
        builder.override_type::<T>(name);
        builder.build()
    }
}

/// Strips a namespace prefix such as `vim25:` or `xsd:`.
pub fn local_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(index) => &name[index + 1..],
        None => name,
    }
}
