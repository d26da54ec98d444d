//! Wire codecs bundled behind one interface.

mod json;
mod registry;
mod types;
mod xml;

pub use json::JsonWireCodec;
pub use registry::Codecs;
pub use types::{decode, encode, WireCodec};
pub use xml::XmlWireCodec;
