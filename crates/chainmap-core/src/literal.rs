//! # Literals and Keys
//!
//! A table cell is a [`Literal`]: a `'static` string or an unsigned number.
//! Tables are declared in source, so string cells borrow straight from the
//! binary.
//!
//! Queries arrive with arbitrary lifetimes (a `&str` read from a request, a
//! config file, a test). [`Key`] is the borrowed twin of [`Literal`]. The
//! two hash and compare identically, and `Key` implements
//! [`indexmap::Equivalent`] for `Literal`, so a lookup with an untrusted
//! `&str` probes the index without allocating.
//!
//! [`Column`] connects typed Rust values (label enums, `u32` ids, `&str`
//! addresses) to literals in both directions.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::Equivalent;
use serde::Serialize;

/// One cell of a table: a label or a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// A string literal (label, address, URL).
    Str(&'static str),
    /// A numeric literal (id, domain).
    Num(u64),
}

impl Literal {
    /// Borrow this literal as a lookup key.
    pub fn key(&self) -> Key<'static> {
        match *self {
            Self::Str(s) => Key::Str(s),
            Self::Num(n) => Key::Num(n),
        }
    }

    /// The string payload, if this is a string literal.
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            Self::Str(s) => Some(s),
            Self::Num(_) => None,
        }
    }

    /// The numeric payload, if this is a numeric literal.
    pub fn as_num(&self) -> Option<u64> {
        match *self {
            Self::Num(n) => Some(n),
            Self::Str(_) => None,
        }
    }
}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `Key`'s hash for `Equivalent` lookups.
        self.key().hash(state);
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

/// A borrowed lookup key, compared against [`Literal`] cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// A string key.
    Str(&'a str),
    /// A numeric key.
    Num(u64),
}

impl Equivalent<Literal> for Key<'_> {
    fn equivalent(&self, literal: &Literal) -> bool {
        *self == literal.key()
    }
}

impl From<Literal> for Key<'static> {
    fn from(literal: Literal) -> Self {
        literal.key()
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

/// Render a key path as `a, b, c` for diagnostics.
pub(crate) fn render_path(path: &[Key<'_>]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A typed value that can sit in a table column.
///
/// `from_literal` is a representation check only (is this cell a string /
/// a number that fits?). Membership in a particular table is the job of
/// the lookup views.
pub trait Column: Copy + 'static {
    /// The literal this value is stored as.
    fn literal(self) -> Literal;

    /// Read a cell back as this type.
    fn from_literal(literal: &Literal) -> Option<Self>;

    /// This value as a lookup key.
    fn key(self) -> Key<'static> {
        self.literal().key()
    }
}

impl Column for &'static str {
    fn literal(self) -> Literal {
        Literal::Str(self)
    }

    fn from_literal(literal: &Literal) -> Option<Self> {
        literal.as_str()
    }
}

macro_rules! numeric_column {
    ($($ty:ty),+) => {
        $(
            impl Column for $ty {
                fn literal(self) -> Literal {
                    Literal::Num(u64::from(self))
                }

                fn from_literal(literal: &Literal) -> Option<Self> {
                    literal.as_num().and_then(|n| <$ty>::try_from(n).ok())
                }
            }

            impl From<$ty> for Key<'static> {
                fn from(n: $ty) -> Self {
                    Key::Num(u64::from(n))
                }
            }
        )+
    };
}

numeric_column!(u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn literal_and_key_hash_alike() {
        let owned = String::from("Polygon");
        assert_eq!(
            hash_of(&Literal::Str("Polygon")),
            hash_of(&Key::Str(owned.as_str()))
        );
        assert_eq!(hash_of(&Literal::Num(7)), hash_of(&Key::Num(7)));
    }

    #[test]
    fn key_equivalent_to_literal() {
        assert!(Key::Str("Base").equivalent(&Literal::Str("Base")));
        assert!(!Key::Str("7").equivalent(&Literal::Num(7)));
        assert!(!Key::Num(6).equivalent(&Literal::Num(7)));
    }

    #[test]
    fn numeric_column_narrows() {
        assert_eq!(u16::from_literal(&Literal::Num(30)), Some(30));
        assert_eq!(u16::from_literal(&Literal::Num(70_000)), None);
        assert_eq!(u32::from_literal(&Literal::Str("7")), None);
        assert_eq!(7u32.literal(), Literal::Num(7));
    }

    #[test]
    fn str_column() {
        assert_eq!("0xabc".literal(), Literal::Str("0xabc"));
        assert_eq!(<&str>::from_literal(&Literal::Num(1)), None);
    }

    #[test]
    fn display() {
        assert_eq!(Literal::Str("Mainnet").to_string(), "Mainnet");
        assert_eq!(Literal::Num(5).to_string(), "5");
        assert_eq!(render_path(&[Key::Str("Testnet"), Key::Num(7)]), "Testnet, 7");
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_string(&Literal::Num(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Literal::Str("Base")).unwrap(),
            "\"Base\""
        );
    }
}
