//! XML codec wrapper.

use crate::constants::WireFormat;
use crate::error::{DecodeError, EncodeError};
use crate::node::Node;
use crate::xml::{self, XmlOptions};

use super::types::WireCodec;

pub struct XmlWireCodec {
    pub options: XmlOptions,
}

impl Default for XmlWireCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWireCodec {
    pub fn new() -> Self {
        Self {
            options: XmlOptions::default(),
        }
    }

    pub fn with_options(options: XmlOptions) -> Self {
        Self { options }
    }

    pub fn id(&self) -> &'static str {
        "xml"
    }

    pub fn format(&self) -> WireFormat {
        WireFormat::Xml
    }

    pub fn encode_node(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        xml::node_to_vec(node, &self.options)
    }

    pub fn decode_node(&self, bytes: &[u8]) -> Result<Node, DecodeError> {
        let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::Xml(e.to_string()))?;
        xml::node_from_str(text)
    }
}

impl WireCodec for XmlWireCodec {
    fn id(&self) -> &'static str {
        self.id()
    }

    fn format(&self) -> WireFormat {
        self.format()
    }

    fn encode_node(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        self.encode_node(node)
    }

    fn decode_node(&self, bytes: &[u8]) -> Result<Node, DecodeError> {
        self.decode_node(bytes)
    }
}
