//! Aggregate codec holder.

use crate::constants::WireFormat;

use super::{JsonWireCodec, WireCodec, XmlWireCodec};

pub struct Codecs {
    pub json: JsonWireCodec,
    pub xml: XmlWireCodec,
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}

impl Codecs {
    pub fn new() -> Self {
        Self {
            json: JsonWireCodec::new(),
            xml: XmlWireCodec::new(),
        }
    }

    /// The codec for `format`.
    pub fn get(&self, format: WireFormat) -> &dyn WireCodec {
        match format {
            WireFormat::Json => &self.json,
            WireFormat::Xml => &self.xml,
        }
    }
}
