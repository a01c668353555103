//! # Closed Label Enumerations
//!
//! A registry's valid labels are a closed set known at build time. The
//! [`labels!`](crate::labels) macro declares that set as a fieldless enum,
//! so:
//!
//! - a duplicate label is a compile error (duplicate variant),
//! - code holding a label cannot hold an invalid one,
//! - `match` over labels is checked for exhaustiveness.
//!
//! Declaring `enum Sub: "kind" in Parent { … }` additionally generates
//! `From<Sub> for Parent` and `TryFrom<Parent> for Sub`; a variant missing
//! from `Parent` fails to compile.
//!
//! [`TotalMap`] ties such an enum to a lookup view: construction proves
//! every label has a row and every row has a label, after which lookups by
//! label cannot fail.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::const_map::ConstMap;
use crate::error::TableError;
use crate::literal::Column;

/// A closed enumeration of string labels.
pub trait Label: Column + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {
    /// Human-readable name of the label set, used in error messages.
    const KIND: &'static str;

    /// Every label, in declaration order.
    fn all() -> &'static [Self];

    /// Exact, case-sensitive parse of a label name.
    fn parse_label(s: &str) -> Option<Self>;
}

/// Declare a closed label enumeration.
///
/// ```
/// chainmap_core::labels! {
///     /// Settlement layers.
///     pub enum Layer: "layer" {
///         Mainnet,
///         Testnet,
///     }
/// }
///
/// assert_eq!(Layer::ALL, [Layer::Mainnet, Layer::Testnet]);
/// assert_eq!("Testnet".parse::<Layer>().unwrap(), Layer::Testnet);
/// assert!("testnet".parse::<Layer>().is_err());
/// ```
#[macro_export]
macro_rules! labels {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal in $parent:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $crate::labels! {
            $(#[$meta])*
            $vis enum $name : $kind {
                $( $(#[$vmeta])* $variant ),+
            }
        }

        impl ::core::convert::From<$name> for $parent {
            fn from(label: $name) -> Self {
                match label {
                    $( $name::$variant => $parent::$variant, )+
                }
            }
        }

        impl ::core::convert::TryFrom<$parent> for $name {
            type Error = $crate::RegistryError;

            fn try_from(label: $parent) -> ::core::result::Result<Self, Self::Error> {
                <$name as $crate::Label>::parse_label(label.as_str())
                    .ok_or_else(|| $crate::RegistryError::unknown($kind, label))
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every label, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// The label's canonical name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::RegistryError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                <Self as $crate::Label>::parse_label(s)
                    .ok_or_else(|| $crate::RegistryError::unknown($kind, s))
            }
        }

        impl $crate::Column for $name {
            fn literal(self) -> $crate::Literal {
                $crate::Literal::Str(self.as_str())
            }

            fn from_literal(literal: &$crate::Literal) -> ::core::option::Option<Self> {
                literal.as_str().and_then(<Self as $crate::Label>::parse_label)
            }
        }

        impl $crate::Label for $name {
            const KIND: &'static str = $kind;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn parse_label(s: &str) -> ::core::option::Option<Self> {
                match s {
                    $( stringify!($variant) => ::core::option::Option::Some(Self::$variant), )+
                    _ => ::core::option::Option::None,
                }
            }
        }

        $crate::leaf_payload!($name);

        impl ::core::convert::From<$name> for $crate::Key<'static> {
            fn from(label: $name) -> Self {
                $crate::Key::Str(label.as_str())
            }
        }

        impl<'a> ::core::convert::From<$name> for $crate::Input<'a> {
            fn from(label: $name) -> Self {
                $crate::Input::Label(label.as_str())
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        // Deserialization routes through `parse_label`, so unknown labels
        // are rejected rather than silently accepted.
        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                raw.parse()
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

/// A lookup from every label of `K` to a `V`, proven total at construction.
#[derive(Debug, Clone)]
pub struct TotalMap<K, V> {
    name: &'static str,
    entries: IndexMap<K, V>,
}

impl<K: Label, V: Column> TotalMap<K, V> {
    /// Project a one-key view onto the label enum `K`.
    ///
    /// # Errors
    ///
    /// [`TableError::MissingKey`] if some label of `K` has no row,
    /// [`TableError::UndeclaredLabel`] if the view has a row whose label is
    /// not a `K`, and the errors of [`ConstMap::collect`].
    pub fn new(view: &ConstMap) -> Result<Self, TableError> {
        let entries = view.collect(K::all())?;
        if let Some(label) = view.keys().into_iter().find(|key| K::from_literal(key).is_none()) {
            return Err(TableError::UndeclaredLabel {
                view: view.name(),
                kind: K::KIND,
                label,
            });
        }
        Ok(Self {
            name: view.name(),
            entries,
        })
    }

    /// The value declared for `key`.
    pub fn get(&self, key: K) -> V {
        // Construction inserted every label of `K`.
        self.entries[&key]
    }

    /// Name of the underlying view.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Entries in declaration order of `K`.
    pub fn iter(&self) -> impl Iterator<Item = (K, V)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, *value))
    }
}
