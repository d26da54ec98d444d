//! JSON codec wrapper.

use crate::constants::WireFormat;
use crate::error::{DecodeError, EncodeError};
use crate::json::{self, JsonOptions};
use crate::node::Node;

use super::types::WireCodec;

pub struct JsonWireCodec {
    pub options: JsonOptions,
}

impl Default for JsonWireCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWireCodec {
    pub fn new() -> Self {
        Self {
            options: JsonOptions::default(),
        }
    }

    pub fn with_options(options: JsonOptions) -> Self {
        Self { options }
    }

    pub fn id(&self) -> &'static str {
        "json"
    }

    pub fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    pub fn encode_node(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        json::node_to_vec(node, &self.options)
    }

    pub fn decode_node(&self, bytes: &[u8]) -> Result<Node, DecodeError> {
        json::node_from_slice(bytes)
    }
}

impl WireCodec for JsonWireCodec {
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
