//! Encoding and decoding between typed values and the neutral [`Node`] tree.
//!
//! [`Node`]: crate::node::Node

mod decode;
mod encode;

pub use decode::{decode_struct, Decode, Decoder, StructReader};
pub use encode::{encode_struct, Encode, Encoder, StructWriter};
