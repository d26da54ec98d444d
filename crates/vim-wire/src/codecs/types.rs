//! Common codec trait and typed helpers.

use crate::codec::{Decode, Decoder, Encode, Encoder};
use crate::constants::WireFormat;
use crate::error::{DecodeError, EncodeError};
use crate::node::Node;
use crate::registry::Registry;

/// A wire format that renders and parses the node tree.
pub trait WireCodec {
    fn id(&self) -> &'static str;
    fn format(&self) -> WireFormat;
    fn encode_node(&self, node: &Node) -> Result<Vec<u8>, EncodeError>;
    fn decode_node(&self, bytes: &[u8]) -> Result<Node, DecodeError>;
}

/// Encodes a typed value with any codec.
pub fn encode<C, T>(codec: &C, value: &T, registry: &Registry) -> Result<Vec<u8>, EncodeError>
where
    C: WireCodec + ?Sized,
    T: Encode + ?Sized,
{
    let node = value.encode(&Encoder::new(registry, codec.format()))?;
    codec.encode_node(&node)
}

/// Decodes a typed value with any codec.
pub fn decode<C, T>(codec: &C, bytes: &[u8], registry: &Registry) -> Result<T, DecodeError>
where
    C: WireCodec + ?Sized,
    T: Decode,
{
    let node = codec.decode_node(bytes)?;
    T::decode(&node, &mut Decoder::new(registry, codec.format()))
}
