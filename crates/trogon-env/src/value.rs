//! Text-to-type conversions used by the typed accessors.

use std::ffi::OsString;

use chrono::TimeDelta;

use crate::duration::parse_duration;
use crate::error::ParseError;

/// A type that can be read out of an environment variable.
///
/// Implementations must be total over any input: every string either parses
/// or yields a [`ParseError`], never a panic.
pub trait EnvValue: Sized {
    fn parse_env(raw: &str) -> Result<Self, ParseError>;

    /// Called for a value that is present but not valid UTF-8. Rejected
    /// unless the type can hold arbitrary text.
    fn parse_env_os(raw: OsString) -> Result<Self, ParseError> {
        Err(ParseError::NotUnicode(raw))
    }
}

impl EnvValue for String {
    /// Any text is valid, including the empty string.
    fn parse_env(raw: &str) -> Result<Self, ParseError> {
        Ok(raw.to_string())
    }

    /// Invalid sequences become U+FFFD; presence alone decides success.
    fn parse_env_os(raw: OsString) -> Result<Self, ParseError> {
        Ok(raw.to_string_lossy().into_owned())
    }
}

impl EnvValue for bool {
    fn parse_env(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(ParseError::Bool(raw.to_string())),
        }
    }
}

macro_rules! signed_env_value {
    ($($ty:ty),*) => {$(
        impl EnvValue for $ty {
            fn parse_env(raw: &str) -> Result<Self, ParseError> {
                raw.parse::<$ty>().map_err(|source| ParseError::Int {
                    value: raw.to_string(),
                    source,
                })
            }
        }
    )*};
}

macro_rules! unsigned_env_value {
    ($($ty:ty),*) => {$(
        impl EnvValue for $ty {
            /// Rejects any sign, so `-1` can never wrap around.
            fn parse_env(raw: &str) -> Result<Self, ParseError> {
                if raw.starts_with(['+', '-']) {
                    return Err(ParseError::Signed {
                        value: raw.to_string(),
                    });
                }
                raw.parse::<$ty>().map_err(|source| ParseError::Int {
                    value: raw.to_string(),
                    source,
                })
            }
        }
    )*};
}

macro_rules! float_env_value {
    ($($ty:ty),*) => {$(
        impl EnvValue for $ty {
            /// A finite literal too large for the type is rejected rather
            /// than rounded to infinity.
            fn parse_env(raw: &str) -> Result<Self, ParseError> {
                let value = raw.parse::<$ty>().map_err(|source| ParseError::Float {
                    value: raw.to_string(),
                    source,
                })?;
                if value.is_infinite() && !spells_infinity(raw) {
                    return Err(ParseError::FloatOverflow(raw.to_string()));
                }
                Ok(value)
            }
        }
    )*};
}

signed_env_value!(isize, i64, i32);
unsigned_env_value!(usize, u64, u32, u16);
float_env_value!(f32, f64);

impl EnvValue for TimeDelta {
    fn parse_env(raw: &str) -> Result<Self, ParseError> {
        Ok(parse_duration(raw)?)
    }
}

fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
