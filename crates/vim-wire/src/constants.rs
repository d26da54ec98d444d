//! Wire-level names shared by the JSON and XML adapters.

/// JSON key carrying the discriminator of a data object or enveloped value.
pub const TYPE_NAME_KEY: &str = "_typeName";

/// JSON key carrying the payload of an enveloped primitive or array wrapper.
pub const VALUE_KEY: &str = "_value";

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const VIM25_NAMESPACE: &str = "urn:vim25";

pub const XSI_PREFIX: &str = "xsi";
pub const XSD_PREFIX: &str = "xsd";
pub const VIM25_PREFIX: &str = "vim25";

/// Wire format a codec reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    Xml = 0,
    Json = 1,
}

impl WireFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            WireFormat::Xml => "xml",
            WireFormat::Json => "json",
        }
    }
}
