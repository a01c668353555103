//! # Lenient Converter Input
//!
//! The `to_*` converters accept a label, an id in any integer width, or a
//! loosely typed JSON value. [`Input`] is the common form they all reduce
//! to before matching. Whatever the input was, a failed conversion reports
//! it in its original rendering.
//!
//! A JSON float with no fractional part (`7.0`) counts as the integer it
//! spells, up to 2^53 in magnitude where every integer is exact. Other
//! floats are never ids.

use std::fmt;

/// One converter argument, classified by representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// A string, matched exactly against declared labels.
    Label(&'a str),
    /// A non-negative integer that fits the native width.
    Number(u64),
    /// An integer outside `u64`: negative, or from a wider type.
    Wide(i128),
    /// Anything else (booleans, fractional floats, JSON objects), rendered.
    Other(String),
}

impl Input<'_> {
    /// The value as an unsigned integer, if it is one.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::Number(n) => Some(n),
            Self::Wide(n) => u64::try_from(n).ok(),
            Self::Label(_) | Self::Other(_) => None,
        }
    }
}

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Wide(n) => write!(f, "{n}"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Self::Label(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Self::Label(s.as_str())
    }
}

macro_rules! unsigned_input {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Input<'_> {
                fn from(n: $ty) -> Self {
                    Self::Number(u64::from(n))
                }
            }
        )+
    };
}

macro_rules! signed_input {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Input<'_> {
                fn from(n: $ty) -> Self {
                    Self::Wide(i128::from(n))
                }
            }
        )+
    };
}

unsigned_input!(u8, u16, u32, u64);
signed_input!(i8, i16, i32, i64, i128);

impl From<usize> for Input<'_> {
    fn from(n: usize) -> Self {
        u64::try_from(n).map_or_else(|_| Self::Other(n.to_string()), Self::Number)
    }
}

impl From<u128> for Input<'_> {
    fn from(n: u128) -> Self {
        i128::try_from(n).map_or_else(|_| Self::Other(n.to_string()), Self::Wide)
    }
}

impl From<bool> for Input<'_> {
    fn from(b: bool) -> Self {
        Self::Other(b.to_string())
    }
}

impl<'a> From<&'a serde_json::Value> for Input<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Label(s),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Self::Number(u)
                } else if let Some(i) = n.as_i64() {
                    Self::Wide(i128::from(i))
                } else if let Some(whole) = n.as_f64().filter(|f| is_exact_integer(*f)) {
                    let whole = whole as i64;
                    u64::try_from(whole).map_or(Self::Wide(i128::from(whole)), Self::Number)
                } else {
                    Self::Other(n.to_string())
                }
            }
            other => Self::Other(other.to_string()),
        }
    }
}

fn is_exact_integer(f: f64) -> bool {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    f.fract() == 0.0 && f.abs() <= EXACT
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_widths_classify() {
        assert_eq!(Input::from(7u8), Input::Number(7));
        assert_eq!(Input::from(7usize), Input::Number(7));
        assert_eq!(Input::from(7i32), Input::Wide(7));
        assert_eq!(Input::from(-1i64), Input::Wide(-1));
        assert_eq!(Input::from(7u128), Input::Wide(7));
        assert_eq!(Input::from(u128::MAX), Input::Other(u128::MAX.to_string()));
    }

    #[test]
    fn narrowing_to_u64() {
        assert_eq!(Input::from(7i64).as_u64(), Some(7));
        assert_eq!(Input::from(-7i64).as_u64(), None);
        assert_eq!(Input::from(i128::MAX).as_u64(), None);
        assert_eq!(Input::from("7").as_u64(), None);
        assert_eq!(Input::from(true).as_u64(), None);
    }

    #[test]
    fn json_values_classify() {
        let label = json!("Ethereum");
        let id = json!(2);
        let negative = json!(-3);
        let float = json!(2.5);
        let object = json!({"chain": "Base"});
        assert_eq!(Input::from(&label), Input::Label("Ethereum"));
        assert_eq!(Input::from(&id), Input::Number(2));
        assert_eq!(Input::from(&negative), Input::Wide(-3));
        assert_eq!(Input::from(&float), Input::Other("2.5".into()));
        assert_eq!(Input::from(&object), Input::Other(r#"{"chain":"Base"}"#.into()));
    }

    #[test]
    fn whole_json_floats_are_integers() {
        assert_eq!(Input::from(&json!(7.0)), Input::Number(7));
        assert_eq!(Input::from(&json!(-3.0)), Input::Wide(-3));
        assert_eq!(Input::from(&json!(0.0)), Input::Number(0));
        assert_eq!(Input::from(&json!(7.5)), Input::Other("7.5".into()));
        assert!(matches!(Input::from(&json!(1e300)), Input::Other(_)));
    }

    #[test]
    fn display_keeps_original_rendering() {
        assert_eq!(Input::from("Base").to_string(), "Base");
        assert_eq!(Input::from(-5i8).to_string(), "-5");
        assert_eq!(Input::from(false).to_string(), "false");
        assert_eq!(Input::from(&json!(null)).to_string(), "null");
    }
}
