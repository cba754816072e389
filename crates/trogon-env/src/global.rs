//! Free functions over one process-wide [`EnvReader`] bound to the real
//! environment.
//!
//! The prefix set here is shared by every caller in the process. Set it once
//! during startup, before any other thread starts reading.

use chrono::TimeDelta;

use crate::env::SystemEnv;
use crate::reader::EnvReader;

static DEFAULT_READER: EnvReader<SystemEnv> = EnvReader::system();

/// The reader behind the free functions in this crate.
pub fn default_reader() -> &'static EnvReader<SystemEnv> {
    &DEFAULT_READER
}

/// Replaces the process-wide key prefix. An empty string clears it.
pub fn set_prefix(prefix: &str) {
    DEFAULT_READER.set_prefix(prefix);
}

pub fn prefix() -> String {
    DEFAULT_READER.prefix()
}

pub fn get_string(key: &str, fallback: impl Into<String>) -> String {
    DEFAULT_READER.get_string(key, fallback)
}

pub fn get_string_into(target: &mut String, key: &str, fallback: impl Into<String>) {
    DEFAULT_READER.get_string_into(target, key, fallback);
}

pub fn get_bool(key: &str, fallback: bool) -> bool {
    DEFAULT_READER.get_bool(key, fallback)
}

pub fn get_bool_into(target: &mut bool, key: &str, fallback: bool) {
    DEFAULT_READER.get_bool_into(target, key, fallback);
}

pub fn get_int(key: &str, fallback: isize) -> isize {
    DEFAULT_READER.get_int(key, fallback)
}

pub fn get_int_into(target: &mut isize, key: &str, fallback: isize) {
    DEFAULT_READER.get_int_into(target, key, fallback);
}

pub fn get_int64(key: &str, fallback: i64) -> i64 {
    DEFAULT_READER.get_int64(key, fallback)
}

pub fn get_int64_into(target: &mut i64, key: &str, fallback: i64) {
    DEFAULT_READER.get_int64_into(target, key, fallback);
}

pub fn get_uint(key: &str, fallback: usize) -> usize {
    DEFAULT_READER.get_uint(key, fallback)
}

pub fn get_uint_into(target: &mut usize, key: &str, fallback: usize) {
    DEFAULT_READER.get_uint_into(target, key, fallback);
}

pub fn get_uint64(key: &str, fallback: u64) -> u64 {
    DEFAULT_READER.get_uint64(key, fallback)
}

pub fn get_uint64_into(target: &mut u64, key: &str, fallback: u64) {
    DEFAULT_READER.get_uint64_into(target, key, fallback);
}

pub fn get_float32(key: &str, fallback: f32) -> f32 {
    DEFAULT_READER.get_float32(key, fallback)
}

pub fn get_float32_into(target: &mut f32, key: &str, fallback: f32) {
    DEFAULT_READER.get_float32_into(target, key, fallback);
}

pub fn get_float64(key: &str, fallback: f64) -> f64 {
    DEFAULT_READER.get_float64(key, fallback)
}

pub fn get_float64_into(target: &mut f64, key: &str, fallback: f64) {
    DEFAULT_READER.get_float64_into(target, key, fallback);
}

pub fn get_duration(key: &str, fallback: TimeDelta) -> TimeDelta {
    DEFAULT_READER.get_duration(key, fallback)
}

pub fn get_duration_into(target: &mut TimeDelta, key: &str, fallback: TimeDelta) {
    DEFAULT_READER.get_duration_into(target, key, fallback);
}
