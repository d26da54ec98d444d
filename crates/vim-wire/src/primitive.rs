//! Primitive wire types: the fixed table of `xsd:` scalar names and the Rust
//! values bound to them.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};

/// One entry of the primitive alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Binary,
    DateTime,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 10] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::String,
        PrimitiveKind::Binary,
        PrimitiveKind::DateTime,
    ];

    pub const fn wire_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
            PrimitiveKind::Binary => "binary",
            PrimitiveKind::DateTime => "dateTime",
        }
    }

    /// Name of the `ArrayOf` wrapper used for a list of this kind in an
    /// `anyType` position.
    pub const fn array_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "ArrayOfBoolean",
            PrimitiveKind::Byte => "ArrayOfByte",
            PrimitiveKind::Short => "ArrayOfShort",
            PrimitiveKind::Int => "ArrayOfInt",
            PrimitiveKind::Long => "ArrayOfLong",
            PrimitiveKind::Float => "ArrayOfFloat",
            PrimitiveKind::Double => "ArrayOfDouble",
            PrimitiveKind::String => "ArrayOfString",
            PrimitiveKind::Binary => "ArrayOfBinary",
            PrimitiveKind::DateTime => "ArrayOfDateTime",
        }
    }

    /// Resolves a primitive name, ignoring any namespace prefix (`xsd:int`).
    pub fn from_wire_name(name: &str) -> Option<Self> {
        let local = name.rsplit(':').next().unwrap_or(name);
        match local {
            "boolean" => Some(PrimitiveKind::Boolean),
            "byte" => Some(PrimitiveKind::Byte),
            "short" => Some(PrimitiveKind::Short),
            "int" => Some(PrimitiveKind::Int),
            "long" => Some(PrimitiveKind::Long),
            "float" => Some(PrimitiveKind::Float),
            "double" => Some(PrimitiveKind::Double),
            "string" => Some(PrimitiveKind::String),
            "binary" | "base64Binary" => Some(PrimitiveKind::Binary),
            "dateTime" => Some(PrimitiveKind::DateTime),
            _ => None,
        }
    }
}

/// A primitive value held in an `anyType` position.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Boolean(bool),
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
    DateTime(DateTime<Utc>),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Boolean(_) => PrimitiveKind::Boolean,
            Primitive::Byte(_) => PrimitiveKind::Byte,
            Primitive::Short(_) => PrimitiveKind::Short,
            Primitive::Int(_) => PrimitiveKind::Int,
            Primitive::Long(_) => PrimitiveKind::Long,
            Primitive::Float(_) => PrimitiveKind::Float,
            Primitive::Double(_) => PrimitiveKind::Double,
            Primitive::String(_) => PrimitiveKind::String,
            Primitive::Binary(_) => PrimitiveKind::Binary,
            Primitive::DateTime(_) => PrimitiveKind::DateTime,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        self.kind().wire_name()
    }

    /// XML lexical form. Bytes are written signed, as `xsd:byte` requires.
    pub fn lexical(&self) -> String {
        match self {
            Primitive::Boolean(v) => v.to_string(),
            Primitive::Byte(v) => (*v as i8).to_string(),
            Primitive::Short(v) => v.to_string(),
            Primitive::Int(v) => v.to_string(),
            Primitive::Long(v) => v.to_string(),
            Primitive::Float(v) => float_lexical(f64::from(*v), v.to_string()),
            Primitive::Double(v) => float_lexical(*v, v.to_string()),
            Primitive::String(v) => v.clone(),
            Primitive::Binary(v) => STANDARD.encode(v),
            Primitive::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            Primitive::Byte(v) => Some(i64::from(*v as i8)),
            Primitive::Short(v) => Some(i64::from(*v)),
            Primitive::Int(v) => Some(i64::from(*v)),
            Primitive::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Primitive::Float(v) => Some(f64::from(*v)),
            Primitive::Double(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }
}

fn float_lexical(value: f64, display: String) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "INF".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_owned()
    } else {
        display
    }
}

/// Parses the XSD lexical forms of a floating point value.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    match text.trim() {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

pub(crate) fn parse_base64(text: &str) -> Option<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact).ok()
}

/// Binds a Rust scalar to its entry in the primitive table.
pub trait PrimitiveType: Sized {
    const KIND: PrimitiveKind;

    fn into_primitive(self) -> Primitive;

    fn from_primitive(value: Primitive) -> Option<Self>;
}

macro_rules! primitive_type {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl PrimitiveType for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::$variant;

                fn into_primitive(self) -> Primitive {
                    Primitive::$variant(self.into())
                }

                fn from_primitive(value: Primitive) -> Option<Self> {
                    match value {
                        Primitive::$variant(v) => Some(v.into()),
                        _ => None,
                    }
                }
            }
        )+
    };
}

primitive_type! {
    bool => Boolean,
    u8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Binary => Binary,
    DateTime<Utc> => DateTime,
}

/// Raw bytes carried as base64 text on both wires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary(pub Vec<u8>);

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary(bytes)
    }
}

impl From<Binary> for Vec<u8> {
    fn from(value: Binary) -> Self {
        value.0
    }
}

/// Bytes carried element-by-element as signed `xsd:byte` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteSlice(pub Vec<u8>);

impl ByteSlice {
    pub fn from_signed(values: &[i8]) -> Self {
        ByteSlice(values.iter().map(|v| *v as u8).collect())
    }

    pub fn to_signed(&self) -> Vec<i8> {
        self.0.iter().map(|v| *v as i8).collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteSlice {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSlice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_table() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_wire_name(kind.wire_name()), Some(kind));
            let prefixed = format!("xsd:{}", kind.wire_name());
            assert_eq!(PrimitiveKind::from_wire_name(&prefixed), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_wire_name("VirtualDisk"), None);
    }

    #[test]
    fn bytes_are_written_signed() {
        assert_eq!(Primitive::Byte(0xb0).lexical(), "-80");
        assert_eq!(Primitive::Byte(4).lexical(), "4");
        assert_eq!(
            ByteSlice::from_signed(&[4, -80, -79, -78]).as_bytes(),
            &[0x04, 0xb0, 0xb1, 0xb2]
        );
    }

    #[test]
    fn float_lexical_uses_xsd_specials() {
        assert_eq!(Primitive::Double(f64::INFINITY).lexical(), "INF");
        assert_eq!(Primitive::Float(f32::NEG_INFINITY).lexical(), "-INF");
        assert_eq!(Primitive::Double(f64::NAN).lexical(), "NaN");
        assert_eq!(Primitive::Double(1.5).lexical(), "1.5");
        assert!(parse_float("NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_float(" -INF "), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn binary_lexical_is_padded_base64() {
        assert_eq!(Primitive::Binary(b"vim".to_vec()).lexical(), "dmlt");
        assert_eq!(Primitive::Binary(vec![1]).lexical(), "AQ==");
        assert_eq!(parse_base64("AQ==\n"), Some(vec![1]));
    }

    #[test]
    fn date_time_is_rfc3339_utc() {
        let value = parse_date_time("2024-01-02T03:04:05+02:00").unwrap();
        assert_eq!(Primitive::DateTime(value).lexical(), "2024-01-02T01:04:05Z");
    }
}
