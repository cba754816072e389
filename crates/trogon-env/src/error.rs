//! Why a raw environment value could not be used.
//!
//! Messages describe the problem only; the key and raw value are added by
//! the reader when it logs them.
//!
//! These never reach callers of the typed accessors; they are logged and
//! the fallback is returned instead. [`EnvValue::parse_env`](crate::EnvValue::parse_env)
//! and [`parse_duration`](crate::parse_duration) expose them directly.

use std::ffi::OsString;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Failure to parse a duration string such as `"2h30m45s"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} out of range")]
    Overflow(String),
}

/// Failure to turn a present environment value into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("not a valid boolean")]
    Bool(String),

    #[error("not a valid integer: {source}")]
    Int {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("sign not allowed for an unsigned integer")]
    Signed { value: String },

    #[error("not a valid number: {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("out of range for the target precision")]
    FloatOverflow(String),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("not valid unicode")]
    NotUnicode(OsString),
}
