//! Deep copy through the JSON wire form.
//!
//! The copy shares nothing with the source. It is exactly as faithful as the
//! JSON codec: an optional list that is present but empty is omitted on the
//! wire and comes back as `None`.

use crate::codecs::{self, JsonWireCodec};
use crate::codec::{Decode, Encode};
use crate::error::CopyError;
use crate::registry::Registry;

pub fn deep_copy<T: Encode + Decode>(value: &T, registry: &Registry) -> Result<T, CopyError> {
    let codec = JsonWireCodec::new();
    let bytes = codecs::encode(&codec, value, registry)?;
    Ok(codecs::decode(&codec, &bytes, registry)?)
}

/// Like [`deep_copy`], panicking when the value cannot take the round trip.
pub fn must_deep_copy<T: Encode + Decode>(value: &T, registry: &Registry) -> T {
    match deep_copy(value, registry) {
        Ok(copy) => copy,
        Err(err) => panic!("{err}"),
    }
}
