//! Typed environment variable lookups with fallbacks.
//!
//! # Quick Start
//!
//! ```
//! use chrono::TimeDelta;
//!
//! let workers = trogon_env::get_uint("WORKERS", 4);
//! let timeout = trogon_env::get_duration("REQUEST_TIMEOUT", TimeDelta::seconds(30));
//! # let _ = (workers, timeout);
//! ```
//!
//! Each accessor looks the key up, parses the value, and returns the fallback
//! when the key is absent or the value does not parse. Nothing is ever
//! returned as an error; malformed values are logged through `tracing`.
//!
//! | Accessor | Type | Accepts |
//! |----------|------|---------|
//! | `get_string` | `String` | anything, including `""` |
//! | `get_bool` | `bool` | `1 t T true TRUE True`, `0 f F false FALSE False` |
//! | `get_int`, `get_int64` | `isize`, `i64` | base-10, optional sign |
//! | `get_uint`, `get_uint64` | `usize`, `u64` | base-10, no sign |
//! | `get_float32`, `get_float64` | `f32`, `f64` | decimal or exponent notation |
//! | `get_duration` | [`TimeDelta`](chrono::TimeDelta) | `"1h30m"`, `"-250ms"`, see [`parse_duration`] |
//!
//! Every accessor has an `_into` sibling that assigns through `&mut T`.
//!
//! # Readers and the default reader
//!
//! The free functions delegate to one process-wide [`EnvReader`] over
//! [`SystemEnv`]. Build your own reader to isolate a prefix or to test against
//! `InMemoryEnv`* without touching the process environment:
//!
//! ```ignore
//! use trogon_env::{EnvReader, InMemoryEnv};
//!
//! let reader = EnvReader::new(InMemoryEnv::new().with("APP_NAME", "svc"))
//!     .with_prefix("APP_");
//! assert_eq!(reader.get_string("NAME", "default"), "svc");
//! ```
//!
//! *Available with `#[cfg(test)]` or the `"test-support"` feature.
//!
//! # Thread Safety
//!
//! [`SystemEnv`] is zero-sized and `Send + Sync`, so the default reader can be
//! shared freely. The prefix is last-write-wins; set it once at startup.
//! `InMemoryEnv` is `RefCell`-backed and not `Sync`.

pub mod duration;
pub mod env;
pub mod error;
mod global;
mod reader;
mod value;

pub use duration::parse_duration;
#[cfg(any(test, feature = "test-support"))]
pub use env::InMemoryEnv;
pub use env::{LookupFn, ReadEnv, SystemEnv};
pub use error::{DurationError, ParseError};
pub use global::{
    default_reader, get_bool, get_bool_into, get_duration, get_duration_into, get_float32,
    get_float32_into, get_float64, get_float64_into, get_int, get_int_into, get_int64,
    get_int64_into, get_string, get_string_into, get_uint, get_uint_into, get_uint64,
    get_uint64_into, prefix, set_prefix,
};
pub use reader::EnvReader;
pub use value::EnvValue;
