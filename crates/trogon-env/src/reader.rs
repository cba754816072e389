use std::borrow::Cow;
use std::env::VarError;
use std::sync::{PoisonError, RwLock};

use chrono::TimeDelta;
use tracing::{trace, warn};

use crate::env::{ReadEnv, SystemEnv};
use crate::value::EnvValue;

/// Reads typed values from an environment, falling back to a caller-supplied
/// default whenever a key is absent or its value does not parse.
///
/// Every accessor is total: it never panics and never returns an error. A
/// malformed value is logged at `warn` and then ignored.
///
/// ```
/// use trogon_env::EnvReader;
/// use trogon_env::env::LookupFn;
///
/// let reader = EnvReader::new(LookupFn::new(|key: &str| match key {
///     "APP_PORT" => Some("8080".to_string()),
///     "APP_DEBUG" => Some("maybe".to_string()),
///     _ => None,
/// }));
/// reader.set_prefix("APP_");
///
/// assert_eq!(reader.get_uint("PORT", 80), 8080);
/// assert!(!reader.get_bool("DEBUG", false));
/// ```
#[derive(Debug)]
pub struct EnvReader<E> {
    env: E,
    prefix: RwLock<String>,
}

impl EnvReader<SystemEnv> {
    /// A reader over the real process environment with no prefix.
    pub const fn system() -> Self {
        Self::new(SystemEnv)
    }
}

impl Default for EnvReader<SystemEnv> {
    fn default() -> Self {
        Self::system()
    }
}

impl<E: ReadEnv> EnvReader<E> {
    pub const fn new(env: E) -> Self {
        Self {
            env,
            prefix: RwLock::new(String::new()),
        }
    }

    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Replaces the prefix prepended to every key. An empty prefix clears it.
    ///
    /// Concurrent callers race with each other and with in-flight lookups;
    /// the last write wins. Configure the prefix once at startup.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        *self.prefix.write().unwrap_or_else(PoisonError::into_inner) = prefix.into();
    }

    pub fn prefix(&self) -> String {
        self.prefix
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn effective_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        let prefix = self.prefix.read().unwrap_or_else(PoisonError::into_inner);
        if prefix.is_empty() {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(format!("{prefix}{key}"))
        }
    }

    /// Resolves `key` and parses it as `T`, returning `fallback` if the key
    /// is absent or the value is malformed.
    pub fn get<T: EnvValue>(&self, key: &str, fallback: T) -> T {
        let key = self.effective_key(key);
        let parsed = match self.env.var(&key) {
            Ok(raw) => T::parse_env(&raw).map_err(|error| (format!("{raw:?}"), error)),
            Err(VarError::NotPresent) => {
                trace!("{key} is not set, using default");
                return fallback;
            }
            Err(VarError::NotUnicode(raw)) => {
                let shown = format!("{raw:?}");
                T::parse_env_os(raw).map_err(|error| (shown, error))
            }
        };

        match parsed {
            Ok(value) => value,
            Err((raw, error)) => {
                warn!("{key}={raw}: {error}, using default");
                fallback
            }
        }
    }

    /// Like [`get`](Self::get), but assigns the result to `target`. The
    /// assignment happens on every path, including the fallback.
    pub fn get_into<T: EnvValue>(&self, target: &mut T, key: &str, fallback: T) {
        *target = self.get(key, fallback);
    }

    /// Present values are returned verbatim, empty string included.
    pub fn get_string(&self, key: &str, fallback: impl Into<String>) -> String {
        self.get(key, fallback.into())
    }

    pub fn get_string_into(&self, target: &mut String, key: &str, fallback: impl Into<String>) {
        self.get_into(target, key, fallback.into());
    }

    /// Accepts `1 t T true TRUE True` and `0 f F false FALSE False`.
    pub fn get_bool(&self, key: &str, fallback: bool) -> bool {
        self.get(key, fallback)
    }

    pub fn get_bool_into(&self, target: &mut bool, key: &str, fallback: bool) {
        self.get_into(target, key, fallback);
    }

    /// Base-10, native pointer width.
    pub fn get_int(&self, key: &str, fallback: isize) -> isize {
        self.get(key, fallback)
    }

    pub fn get_int_into(&self, target: &mut isize, key: &str, fallback: isize) {
        self.get_into(target, key, fallback);
    }

    pub fn get_int64(&self, key: &str, fallback: i64) -> i64 {
        self.get(key, fallback)
    }

    pub fn get_int64_into(&self, target: &mut i64, key: &str, fallback: i64) {
        self.get_into(target, key, fallback);
    }

    /// Base-10, native pointer width. Signed input falls back.
    pub fn get_uint(&self, key: &str, fallback: usize) -> usize {
        self.get(key, fallback)
    }

    pub fn get_uint_into(&self, target: &mut usize, key: &str, fallback: usize) {
        self.get_into(target, key, fallback);
    }

    pub fn get_uint64(&self, key: &str, fallback: u64) -> u64 {
        self.get(key, fallback)
    }

    pub fn get_uint64_into(&self, target: &mut u64, key: &str, fallback: u64) {
        self.get_into(target, key, fallback);
    }

    pub fn get_float32(&self, key: &str, fallback: f32) -> f32 {
        self.get(key, fallback)
    }

    pub fn get_float32_into(&self, target: &mut f32, key: &str, fallback: f32) {
        self.get_into(target, key, fallback);
    }

    pub fn get_float64(&self, key: &str, fallback: f64) -> f64 {
        self.get(key, fallback)
    }

    pub fn get_float64_into(&self, target: &mut f64, key: &str, fallback: f64) {
        self.get_into(target, key, fallback);
    }

    /// See [`parse_duration`](crate::parse_duration) for the accepted format.
    pub fn get_duration(&self, key: &str, fallback: TimeDelta) -> TimeDelta {
        self.get(key, fallback)
    }

    pub fn get_duration_into(&self, target: &mut TimeDelta, key: &str, fallback: TimeDelta) {
        self.get_into(target, key, fallback);
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::env::InMemoryEnv;

    fn reader() -> EnvReader<InMemoryEnv> {
        EnvReader::new(InMemoryEnv::new())
    }

    #[test]
    fn test_absent_key_returns_fallback() {
        let reader = reader();
        assert_eq!(reader.get_string("MISSING", "fallback"), "fallback");
        assert!(reader.get_bool("MISSING", true));
        assert_eq!(reader.get_int("MISSING", -7), -7);
        assert_eq!(reader.get_int64("MISSING", i64::MIN), i64::MIN);
        assert_eq!(reader.get_uint("MISSING", 7), 7);
        assert_eq!(reader.get_uint64("MISSING", u64::MAX), u64::MAX);
        assert_eq!(reader.get_float32("MISSING", 4.2), 4.2);
        assert_eq!(reader.get_float64("MISSING", 42.0), 42.0);
        assert_eq!(
            reader.get_duration("MISSING", TimeDelta::seconds(2)),
            TimeDelta::seconds(2)
        );
    }

    #[test]
    fn test_string() {
        let reader = reader();
        reader.env().set("ENV_TEST_STRING", "foo");
        assert_eq!(reader.get_string("ENV_TEST_STRING", "fallback"), "foo");

        reader.env().set("ENV_TEST_STRING", "");
        assert_eq!(reader.get_string("ENV_TEST_STRING", "fallback"), "");
    }

    #[test]
    fn test_bool() {
        let cases = [
            ("", true, true),
            ("true", false, true),
            ("false", true, false),
            ("TRUE", false, true),
            ("FALSE", true, false),
            ("True", false, true),
            ("False", true, false),
            ("T", false, true),
            ("F", true, false),
            ("1", false, true),
            ("0", true, false),
            ("foobar", true, true),
            ("foobar", false, false),
        ];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_BOOL", raw);
            assert_eq!(reader.get_bool("ENV_TEST_BOOL", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_int() {
        let cases = [("", 42, 42), ("0", 42, 0), ("42", 0, 42), ("-42", 42, -42), ("foobar", 42, 42)];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_INT", raw);
            assert_eq!(reader.get_int("ENV_TEST_INT", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_int64() {
        let cases = [
            ("", 42, 42),
            ("-42", 42, -42),
            ("9223372036854775807", 42, i64::MAX),
            ("-9223372036854775808", 42, i64::MIN),
            ("9223372036854775808", 42, 42),
            ("foobar", 42, 42),
        ];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_INT64", raw);
            assert_eq!(reader.get_int64("ENV_TEST_INT64", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_uint() {
        let cases = [("", 42, 42), ("0", 42, 0), ("42", 0, 42), ("-42", 42, 42), ("foobar", 42, 42)];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_UINT", raw);
            assert_eq!(reader.get_uint("ENV_TEST_UINT", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_uint64() {
        let cases = [
            ("", 42, 42),
            ("-42", 42, 42),
            ("18446744073709551615", 42, u64::MAX),
            ("18446744073709551616", 42, 42),
            ("foobar", 42, 42),
        ];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_UINT64", raw);
            assert_eq!(reader.get_uint64("ENV_TEST_UINT64", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_float32() {
        let cases = [
            ("", 4.2, 4.2),
            ("0", 4.2, 0.0),
            ("0.2", 0.3, 0.2),
            ("-0.2", 0.3, -0.2),
            ("-4.2", 4.2, -4.2),
            ("1e40", 4.2, 4.2),
            ("foobar", 4.2, 4.2),
        ];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_FLOAT32", raw);
            assert_eq!(reader.get_float32("ENV_TEST_FLOAT32", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_float64() {
        let cases = [
            ("", 4.2, 4.2),
            ("0.0", 4.2, 0.0),
            ("-0.2", 0.3, -0.2),
            ("2.5e-3", 0.0, 0.0025),
            ("foobar", 4.2, 4.2),
        ];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_FLOAT64", raw);
            assert_eq!(reader.get_float64("ENV_TEST_FLOAT64", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_duration() {
        let cases = [
            ("", TimeDelta::seconds(2), TimeDelta::seconds(2)),
            ("0", TimeDelta::seconds(2), TimeDelta::zero()),
            ("2ns", TimeDelta::seconds(2), TimeDelta::nanoseconds(2)),
            ("2\u{3bc}s", TimeDelta::seconds(2), TimeDelta::microseconds(2)),
            ("2ms", TimeDelta::seconds(2), TimeDelta::milliseconds(2)),
            ("2h30m45s", TimeDelta::hours(2), TimeDelta::seconds(9045)),
            ("-2h30m", TimeDelta::minutes(150), TimeDelta::minutes(-150)),
            ("45", TimeDelta::seconds(2), TimeDelta::seconds(2)),
            ("foobar", TimeDelta::seconds(2), TimeDelta::seconds(2)),
        ];
        let reader = reader();
        for (raw, fallback, want) in cases {
            reader.env().set("ENV_TEST_DURATION", raw);
            assert_eq!(reader.get_duration("ENV_TEST_DURATION", fallback), want, "value {raw:?}");
        }
    }

    #[test]
    fn test_into_variants_match_accessors() {
        let reader = reader();
        reader.env().set("COUNT", "-42");
        reader.env().set("NAME", "svc");
        reader.env().set("TIMEOUT", "1m");

        let mut count = 0usize;
        reader.get_uint_into(&mut count, "COUNT", 42);
        assert_eq!(count, reader.get_uint("COUNT", 42));
        assert_eq!(count, 42);

        let mut signed = 0i64;
        reader.get_int64_into(&mut signed, "COUNT", 0);
        assert_eq!(signed, -42);

        let mut name = String::from("stale");
        reader.get_string_into(&mut name, "NAME", "default");
        assert_eq!(name, "svc");
        reader.get_string_into(&mut name, "MISSING", "default");
        assert_eq!(name, "default");

        let mut timeout = TimeDelta::zero();
        reader.get_duration_into(&mut timeout, "TIMEOUT", TimeDelta::seconds(5));
        assert_eq!(timeout, TimeDelta::minutes(1));

        let mut flag = true;
        reader.get_bool_into(&mut flag, "MISSING", false);
        assert!(!flag);
    }

    #[test]
    fn test_into_writes_fallback_over_existing_value() {
        let reader = reader();
        let mut rate = 9.9f64;
        reader.env().set("RATE", "foobar");
        reader.get_float64_into(&mut rate, "RATE", 4.2);
        assert_eq!(rate, 4.2);

        let mut small = 1.0f32;
        reader.get_float32_into(&mut small, "RATE", 0.5);
        assert_eq!(small, 0.5);

        let mut int = 1isize;
        reader.get_int_into(&mut int, "RATE", 3);
        assert_eq!(int, 3);

        let mut wide = 1u64;
        reader.get_uint64_into(&mut wide, "RATE", 3);
        assert_eq!(wide, 3);
    }

    #[test]
    fn test_prefix_is_prepended_without_separator() {
        let reader = reader();
        reader.env().set("APP_NAME", "svc");

        assert_eq!(reader.prefix(), "");
        assert_eq!(reader.get_string("NAME", "default"), "default");

        reader.set_prefix("APP_");
        assert_eq!(reader.prefix(), "APP_");
        assert_eq!(reader.get_string("NAME", "default"), "svc");

        reader.set_prefix("");
        assert_eq!(reader.prefix(), "");
        assert_eq!(reader.get_string("NAME", "default"), "default");
    }

    #[test]
    fn test_set_prefix_replaces_rather_than_appends() {
        let reader = reader().with_prefix("A_");
        reader.set_prefix("B_");
        assert_eq!(reader.prefix(), "B_");

        reader.env().set("B_PORT", "9000");
        reader.env().set("A_B_PORT", "1");
        assert_eq!(reader.get_uint("PORT", 80), 9000);
    }

    #[test]
    fn test_prefix_applies_to_every_accessor() {
        let env: InMemoryEnv = [
            ("SVC_FLAG", "t"),
            ("SVC_RATE", "0.5"),
            ("SVC_TIMEOUT", "1.5s"),
        ]
        .into_iter()
        .collect();
        let reader = EnvReader::new(env).with_prefix("SVC_");

        assert!(reader.get_bool("FLAG", false));
        assert_eq!(reader.get_float64("RATE", 1.0), 0.5);
        assert_eq!(
            reader.get_duration("TIMEOUT", TimeDelta::zero()),
            TimeDelta::milliseconds(1500)
        );
    }

    #[test]
    fn test_generic_get_supports_narrow_widths() {
        let reader = EnvReader::new(InMemoryEnv::new().with("PORT", "8080").with("BIG", "70000"));
        assert_eq!(reader.get::<u16>("PORT", 80), 8080);
        assert_eq!(reader.get::<u16>("BIG", 80), 80);
        assert_eq!(reader.get::<i32>("BIG", 0), 70000);

        let mut port = 0u32;
        reader.get_into(&mut port, "PORT", 1);
        assert_eq!(port, 8080);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_value_is_present_for_strings_only() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let reader = reader();
        reader
            .env()
            .set_os("RAW", OsString::from_vec(vec![0x66, 0x6f, 0x80]));
        assert_eq!(reader.get_string("RAW", "fallback"), "fo\u{FFFD}");
        assert_eq!(reader.get_uint("RAW", 7), 7);
        assert!(reader.get_bool("RAW", true));
    }

    #[test]
    #[traced_test]
    fn test_malformed_value_warns_with_prefixed_key_and_raw_value() {
        let reader =
            EnvReader::new(InMemoryEnv::new().with("APP_PORT", "abc")).with_prefix("APP_");
        assert_eq!(reader.get_uint("PORT", 80), 80);

        assert!(logs_contain("WARN"));
        assert!(logs_contain("APP_PORT=\"abc\""));
        assert!(logs_contain("not a valid integer"));
        assert!(logs_contain("using default"));
    }

    #[test]
    #[traced_test]
    fn test_absent_key_does_not_warn() {
        let reader = reader().with_prefix("APP_");
        assert_eq!(reader.get_uint("MISSING_PORT", 80), 80);

        assert!(logs_contain("APP_MISSING_PORT is not set"));
        assert!(!logs_contain("WARN"));
    }

    #[test]
    #[traced_test]
    fn test_valid_value_does_not_log() {
        let reader = EnvReader::new(InMemoryEnv::new().with("PORT", "8080"));
        assert_eq!(reader.get_uint("PORT", 80), 8080);

        assert!(!logs_contain("PORT"));
    }

    #[test]
    fn test_reader_over_borrowed_env() {
        let env = InMemoryEnv::new().with("LEVEL", "3");
        let reader = EnvReader::new(&env);
        assert_eq!(reader.get_int("LEVEL", 0), 3);

        env.set("LEVEL", "4");
        assert_eq!(reader.get_int("LEVEL", 0), 4);
    }
}
