// Scorum Client
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Ordinal tables and tagged variants.
//!
//! An ordinal table is a closed, append-only list of names. The position of a name in the table
//! is its ordinal and is what goes on the wire. [ordinal_table!] generates a fieldless enum for
//! such a table.
//!
//! A tagged variant is a value of one of the table entries together with the fields that entry
//! declares. [static_variant!] generates the enum of such values, its ordinal table and its wire
//! and JSON encodings:
//!
//! * wire: `varint(ordinal) ++ fields` in declaration order,
//! * JSON: `[name, {field: value, ...}]`, `[name, {}]` for entries without fields.
use core::convert::TryFrom;

use crate::error::Error;

#[doc(hidden)]
pub mod __private {
    pub use parity_scale_codec;
    pub use serde;
    pub use serde_json;
}

/// A closed list of names where each name is identified by its position.
pub trait OrdinalTable: Copy + Eq + Sized + 'static {
    /// Label of the table used in error messages.
    const TABLE: &'static str;

    /// All entries in ordinal order.
    const ALL: &'static [Self];

    /// Canonical name of the entry.
    fn name(self) -> &'static str;

    /// Position of the entry in [OrdinalTable::ALL].
    fn ordinal(self) -> u32;

    fn from_ordinal(ordinal: u64) -> Option<Self> {
        let index = usize::try_from(ordinal).ok()?;
        Self::ALL.get(index).copied()
    }

    /// Look up an entry by its canonical name.
    ///
    /// Fails with [Error::UnknownVariant] if no entry has that name.
    fn from_name(name: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|entry| entry.name() == name)
            .ok_or_else(|| Error::UnknownVariant {
                table: Self::TABLE,
                name: name.to_string(),
            })
    }
}

/// Associates a payload type with its ordinal table entry at compile time.
pub trait Tagged {
    type Table: OrdinalTable;

    const KIND: Self::Table;
}

/// Generate a fieldless enum implementing [OrdinalTable].
///
/// ```rust
/// # #[macro_use] extern crate scorum_core;
/// # use scorum_core::OrdinalTable;
/// ordinal_table! {
///     pub enum Color: "color" {
///         Red = "red",
///         Green = "green",
///     }
/// }
///
/// # fn main() {
/// assert_eq!(Color::Green.ordinal(), 1);
/// assert_eq!(Color::from_name("red").unwrap(), Color::Red);
/// # }
/// ```
#[macro_export]
macro_rules! ordinal_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $table:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant
            ),*
        }

        impl $crate::variant::OrdinalTable for $name {
            const TABLE: &'static str = $table;

            const ALL: &'static [Self] = &[$($name::$variant),*];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),*
                }
            }

            fn ordinal(self) -> u32 {
                self as u32
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str($crate::variant::OrdinalTable::name(*self))
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                <$name as $crate::variant::OrdinalTable>::from_name(name)
            }
        }
    };
}

/// Generate a tagged variant enum together with its ordinal table `kind`.
///
/// Entries may declare named fields. Field declaration order is the wire order.
#[macro_export]
macro_rules! static_variant {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $table:literal, kind $kind:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $({ $($field:ident : $fty:ty),* $(,)? })? = $label:literal
            ),* $(,)?
        }
    ) => {
        $crate::ordinal_table! {
            $vis enum $kind : $table {
                $($variant = $label),*
            }
        }

        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant $({ $($field: $fty),* })?
            ),*
        }

        impl $name {
            pub fn kind(&self) -> $kind {
                match self {
                    $($name::$variant { .. } => $kind::$variant),*
                }
            }

            /// Canonical name of the entry this value belongs to.
            pub fn name(&self) -> &'static str {
                $crate::variant::OrdinalTable::name(self.kind())
            }

            pub fn ordinal(&self) -> u32 {
                $crate::variant::OrdinalTable::ordinal(self.kind())
            }
        }

        impl $crate::variant::__private::parity_scale_codec::Encode for $name {
            fn encode_to<T: $crate::variant::__private::parity_scale_codec::Output + ?Sized>(
                &self,
                dest: &mut T,
            ) {
                #[allow(unused_imports)]
                use $crate::variant::__private::parity_scale_codec::Encode as _;
                $crate::Varint::from(self.ordinal()).encode_to(dest);
                match self {
                    $(
                        $name::$variant { $($($field),*)? } => {
                            $($($field.encode_to(dest);)*)?
                        }
                    )*
                }
            }
        }

        impl $crate::variant::__private::parity_scale_codec::Decode for $name {
            fn decode<I: $crate::variant::__private::parity_scale_codec::Input>(
                input: &mut I,
            ) -> Result<Self, $crate::variant::__private::parity_scale_codec::Error> {
                let ordinal = <$crate::Varint as $crate::variant::__private::parity_scale_codec::Decode>::decode(input)?.0;
                let kind = <$kind as $crate::variant::OrdinalTable>::from_ordinal(ordinal)
                    .ok_or_else(|| concat!("Unknown ", $table, " ordinal."))?;
                Ok(match kind {
                    $(
                        $kind::$variant => $name::$variant {
                            $($(
                                $field: <$fty as $crate::variant::__private::parity_scale_codec::Decode>::decode(input)?,
                            )*)?
                        },
                    )*
                })
            }
        }

        impl $crate::variant::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::variant::__private::serde::Serializer,
            {
                use $crate::variant::__private::serde::ser::{SerializeMap, SerializeTuple};

                struct Fields<'a>(&'a $name);

                impl<'a> $crate::variant::__private::serde::Serialize for Fields<'a> {
                    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                    where
                        S: $crate::variant::__private::serde::Serializer,
                    {
                        #[allow(unused_mut)]
                        let mut map = serializer.serialize_map(None)?;
                        match self.0 {
                            $(
                                $name::$variant { $($($field),*)? } => {
                                    $($(map.serialize_entry(stringify!($field), $field)?;)*)?
                                }
                            )*
                        }
                        map.end()
                    }
                }

                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(self.name())?;
                tuple.serialize_element(&Fields(self))?;
                tuple.end()
            }
        }

        impl<'de> $crate::variant::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::variant::__private::serde::Deserializer<'de>,
            {
                #[allow(unused_imports)]
                use $crate::variant::__private::serde::de::Error as _;
                use $crate::variant::__private::serde_json::{Map, Value};

                #[allow(unused_mut, unused_variables)]
                let (name, mut fields): (String, Map<String, Value>) =
                    $crate::variant::__private::serde::Deserialize::deserialize(deserializer)?;
                let kind = <$kind as $crate::variant::OrdinalTable>::from_name(&name)
                    .map_err(D::Error::custom)?;
                Ok(match kind {
                    $(
                        $kind::$variant => $name::$variant {
                            $($(
                                $field: {
                                    let value = fields
                                        .remove(stringify!($field))
                                        .ok_or_else(|| D::Error::missing_field(stringify!($field)))?;
                                    $crate::variant::__private::serde_json::from_value::<$fty>(value)
                                        .map_err(D::Error::custom)?
                                },
                            )*)?
                        },
                    )*
                })
            }
        }
    };
}

static_variant! {
    /// Element type of every `extensions` set. No extension is defined on the current chain.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub enum FutureExtension: "future extension", kind FutureExtensionKind {
        Void = "void_t",
    }
}
