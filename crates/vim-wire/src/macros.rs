//! Declarative helpers for generated wire bindings.

/// Implements [`Encode`](crate::Encode) and [`Decode`](crate::Decode) for
/// structures that implement [`WireType`](crate::WireType).
#[macro_export]
macro_rules! wire_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Encode for $ty {
                fn encode(
                    &self,
                    enc: &$crate::Encoder<'_>,
                ) -> ::std::result::Result<$crate::Node, $crate::EncodeError> {
                    $crate::codec::encode_struct(self, enc)
                }
            }

            impl $crate::Decode for $ty {
                fn decode(
                    node: &$crate::Node,
                    de: &mut $crate::Decoder<'_>,
                ) -> ::std::result::Result<Self, $crate::DecodeError> {
                    $crate::codec::decode_struct(node, de)
                }

                fn absent() -> ::std::option::Option<Self> {
                    ::std::option::Option::Some(::std::default::Default::default())
                }
            }
        )+
    };
}

/// Implements a base accessor trait for each listed type by returning a
/// reference to its embedded base structure (or to itself).
///
/// ```ignore
/// base_accessor!(BaseVirtualDevice::{get_virtual_device, get_virtual_device_mut} -> VirtualDevice {
///     VirtualDevice => self;
///     VirtualDisk => self.virtual_device;
/// });
/// ```
#[macro_export]
macro_rules! base_accessor {
    (
        $trait:ident::{$get:ident, $get_mut:ident} -> $base:ty {
            $($ty:ty => self $(.$field:ident)*);+ $(;)?
        }
    ) => {
        $(
            impl $trait for $ty {
                fn $get(&self) -> &$base {
                    &(*self) $(.$field)*
                }

                fn $get_mut(&mut self) -> &mut $base {
                    &mut (*self) $(.$field)*
                }
            }
        )+
    };
}

/// Declares the enum that holds any concrete subtype of an abstract wire
/// type. Variants are named after their types. The enum implements the base
/// accessor trait by delegating to the variant, and travels on the wire
/// with the variant's discriminator.
#[macro_export]
macro_rules! abstract_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $base:ident => $trait:ident::{$get:ident, $get_mut:ident} {
            $($variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $($variant($variant),)+
        }

        impl $name {
            /// Wire name of the variant's type, as registered by default.
            pub fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }
        }

        impl $trait for $name {
            fn $get(&self) -> &$base {
                match self {
                    $(Self::$variant(value) => value.$get(),)+
                }
            }

            fn $get_mut(&mut self) -> &mut $base {
                match self {
                    $(Self::$variant(value) => value.$get_mut(),)+
                }
            }
        }

        impl $crate::AbstractType for $name {
            const BASE_NAME: &'static str = stringify!($base);

            fn as_object(&self) -> &dyn $crate::DataObject {
                match self {
                    $(Self::$variant(value) => value as &dyn $crate::DataObject,)+
                }
            }

            fn from_object(
                object: ::std::boxed::Box<dyn $crate::DataObject>,
            ) -> ::std::option::Option<Self> {
                $(
                    if object.is::<$variant>() {
                        return $crate::into_concrete::<$variant>(object).map(Self::$variant);
                    }
                )+
                None
            }
        }

        $(
            impl ::std::convert::From<$variant> for $name {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        impl $crate::Encode for $name {
            fn encode(
                &self,
                enc: &$crate::Encoder<'_>,
            ) -> ::std::result::Result<$crate::Node, $crate::EncodeError> {
                $crate::discriminator::encode_abstract(self, enc)
            }
        }

        impl $crate::Decode for $name {
            fn decode(
                node: &$crate::Node,
                de: &mut $crate::Decoder<'_>,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                $crate::discriminator::decode_abstract(node, de)
            }
        }

        impl $crate::ArrayElement for $name {
            const ELEMENT_NAME: &'static str = stringify!($base);
            const ARRAY_NAME: &'static str = concat!("ArrayOf", stringify!($base));
        }
    };
}

/// Implements [`ArrayElement`](crate::ArrayElement) for data objects, so
/// they can travel in an `ArrayOf<Name>` wrapper.
#[macro_export]
macro_rules! array_element {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::ArrayElement for $ty {
                const ELEMENT_NAME: &'static str = stringify!($ty);
                const ARRAY_NAME: &'static str = concat!("ArrayOf", stringify!($ty));
            }
        )+
    };
}

/// Declares a string enumeration. Values this binding does not know are
/// kept verbatim in `Unknown` so they survive a round trip. The default is
/// the empty value, which `omit_empty` fields leave out and which a missing
/// field decodes to.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
            Unknown(::std::string::String),
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unknown(value) => value.as_str(),
                }
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($wire => Self::$variant,)+
                    other => Self::Unknown(other.to_owned()),
                }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::Unknown(::std::string::String::new())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::Encode for $name {
            fn encode(
                &self,
                _enc: &$crate::Encoder<'_>,
            ) -> ::std::result::Result<$crate::Node, $crate::EncodeError> {
                ::std::result::Result::Ok($crate::Node::Value($crate::Primitive::String(
                    self.as_str().to_owned(),
                )))
            }

            fn is_zero(&self) -> bool {
                self.as_str().is_empty()
            }
        }

        impl $crate::Decode for $name {
            fn decode(
                node: &$crate::Node,
                de: &mut $crate::Decoder<'_>,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                let value: ::std::string::String = $crate::Decode::decode(node, de)?;
                ::std::result::Result::Ok(Self::from(value.as_str()))
            }

            fn absent() -> ::std::option::Option<Self> {
                ::std::option::Option::Some(::std::default::Default::default())
            }
        }
    };
}
