//! Virtual hardware versions (`vmx-N`) and the maximum each ESXi release
//! supports.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use vim_wire::{Decode, DecodeError, Decoder, Encode, EncodeError, Encoder, Node, Primitive};

/// Known hardware versions, oldest first. There was never a `vmx-5`.
const KNOWN: &[u32] = &[3, 4, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21];

/// ESXi releases, newest first, with the highest hardware version each runs.
/// Update releases before 7.0 are written as `6.7.2` for 6.7 U2.
const ESXI: &[(&str, u32)] = &[
    ("8.0.2", 21),
    ("8.0", 20),
    ("7.0.2", 19),
    ("7.0.1", 18),
    ("7.0.0", 17),
    ("6.7.2", 15),
    ("6.7", 14),
    ("6.5", 13),
    ("6.0", 11),
    ("5.5", 10),
    ("5.1", 9),
    ("5.0", 8),
    ("4.0", 7),
    ("3", 4),
    ("2", 3),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HardwareVersionError {
    #[error("invalid hardware version: {0:?}")]
    Invalid(String),
}

fn vmx_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^vmx-(\d+)$").unwrap_or_else(|e| panic!("{e}")))
}

/// A `VirtualMachineConfigSpec.version` value. Holds whatever string the
/// server sent; [`HardwareVersion::number`] interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HardwareVersion(String);

impl HardwareVersion {
    pub fn new(number: u32) -> Self {
        Self(format!("vmx-{number}"))
    }

    /// Parses `vmx-N` (any case) or a bare `N` into the canonical form.
    pub fn parse(text: &str) -> Result<Self, HardwareVersionError> {
        let candidate = if text.bytes().all(|b| b.is_ascii_digit()) && !text.is_empty() {
            format!("vmx-{text}")
        } else {
            text.to_owned()
        };
        match Self(candidate).number() {
            Some(number) => Ok(Self::new(number)),
            None => Err(HardwareVersionError::Invalid(text.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part, or `None` when the value is not `vmx-N`.
    pub fn number(&self) -> Option<u32> {
        vmx_pattern()
            .captures(&self.0)
            .and_then(|captures| captures[1].parse().ok())
    }

    pub fn is_valid(&self) -> bool {
        self.number().is_some()
    }

    /// Every known hardware version, oldest first.
    pub fn all() -> Vec<HardwareVersion> {
        KNOWN.iter().copied().map(Self::new).collect()
    }

    /// The newest hardware version an ESXi release supports. The release is
    /// a dotted version such as `7.0.1` or `6.7`.
    pub fn max_for_esxi(esxi: &str) -> Option<HardwareVersion> {
        let release = parse_release(esxi)?;
        ESXI.iter()
            .find(|(floor, _)| parse_release(floor).is_some_and(|floor| release >= floor))
            .map(|(_, number)| Self::new(*number))
    }

    /// Every hardware version an ESXi release can run.
    pub fn supported_by_esxi(esxi: &str) -> Vec<HardwareVersion> {
        let Some(max) = Self::max_for_esxi(esxi).and_then(|v| v.number()) else {
            return Vec::new();
        };
        KNOWN
            .iter()
            .copied()
            .filter(|number| *number <= max)
            .map(Self::new)
            .collect()
    }

    pub fn esxi_releases() -> Vec<&'static str> {
        ESXI.iter().map(|(release, _)| *release).collect()
    }
}

/// `major[.minor[.patch]]`, missing parts read as zero.
fn parse_release(text: &str) -> Option<[u32; 3]> {
    let text = text.strip_prefix('v').unwrap_or(text);
    let mut parts = [0u32; 3];
    let mut count = 0;
    for part in text.split('.') {
        if count == parts.len() || part.is_empty() {
            return None;
        }
        parts[count] = part.parse().ok()?;
        count += 1;
    }
    Some(parts)
}

impl fmt::Display for HardwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(number) => write!(f, "vmx-{number}"),
            None => Ok(()),
        }
    }
}

impl FromStr for HardwareVersion {
    type Err = HardwareVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Encode for HardwareVersion {
    fn encode(&self, _enc: &Encoder<'_>) -> Result<Node, EncodeError> {
        Ok(Node::Value(Primitive::String(self.0.clone())))
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decoding keeps the raw string; newer servers may send versions this
/// table does not list.
impl Decode for HardwareVersion {
    fn decode(node: &Node, de: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        String::decode(node, de).map(Self)
    }

    fn absent() -> Option<Self> {
        Some(Self::default())
    }
}
