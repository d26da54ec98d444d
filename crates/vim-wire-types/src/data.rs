//! Managed object references, descriptions and key/value data objects.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use vim_wire::{
    array_element, wire_type, AnyType, DecodeError, EncodeError, StructReader, StructWriter,
    WireType,
};

/// Opaque `(type, value)` handle of a server-side object.
///
/// On the XML wire the type and server GUID are attributes and the value is
/// the element's character data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ManagedObjectReference {
    pub type_: String,
    pub value: String,
    pub server_guid: String,
}

impl ManagedObjectReference {
    pub fn new(type_: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            value: value.into(),
            server_guid: String::new(),
        }
    }
}

impl fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_, self.value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid managed object reference {0:?}, expected `Type:value`")]
pub struct ReferenceParseError(pub String);

/// Parses the `Type:value` form produced by [`Display`](fmt::Display).
impl FromStr for ManagedObjectReference {
    type Err = ReferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((type_, value)) if !type_.is_empty() && !value.is_empty() => {
                Ok(Self::new(type_, value))
            }
            _ => Err(ReferenceParseError(s.to_owned())),
        }
    }
}

impl WireType for ManagedObjectReference {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.attribute("type", &self.type_)?;
        w.text("value", &self.value)?;
        w.attribute("serverGuid", &self.server_guid)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            type_: r.attribute("type")?,
            value: r.text("value")?,
            server_guid: r.attribute("serverGuid")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    pub label: String,
    pub summary: String,
}

impl WireType for Description {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("label", &self.label)?;
        w.field("summary", &self.summary)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            label: r.field("label")?,
            summary: r.field("summary")?,
        })
    }
}

/// A named setting such as an `extraConfig` entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionValue {
    pub key: String,
    pub value: Option<AnyType>,
}

impl OptionValue {
    pub fn new(key: impl Into<String>, value: impl Into<AnyType>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

impl WireType for OptionValue {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("key", &self.key)?;
        w.field("value", &self.value)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            key: r.field("key")?,
            value: r.field("value")?,
        })
    }
}

/// One property value as returned by the property collector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicProperty {
    pub name: String,
    pub val: Option<AnyType>,
}

impl WireType for DynamicProperty {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("name", &self.name)?;
        w.required("val", &self.val)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: r.field("name")?,
            val: r.required("val")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyAnyValue {
    pub key: String,
    pub value: Option<AnyType>,
}

impl WireType for KeyAnyValue {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("key", &self.key)?;
        w.required("value", &self.value)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            key: r.field("key")?,
            value: r.required("value")?,
        })
    }
}

wire_type!(
    ManagedObjectReference,
    Description,
    OptionValue,
    DynamicProperty,
    KeyAnyValue,
);

array_element!(ManagedObjectReference, OptionValue);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_text_form() {
        let reference: ManagedObjectReference = "VirtualMachine:vm-42".parse().unwrap();
        assert_eq!(reference, ManagedObjectReference::new("VirtualMachine", "vm-42"));
        assert_eq!(reference.to_string(), "VirtualMachine:vm-42");

        let nested: ManagedObjectReference = "Datastore:ds:///vmfs/volumes/1".parse().unwrap();
        assert_eq!(nested.value, "ds:///vmfs/volumes/1");

        assert!("vm-42".parse::<ManagedObjectReference>().is_err());
        assert!(":vm-42".parse::<ManagedObjectReference>().is_err());
    }
}
