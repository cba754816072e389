use std::env::VarError;
use std::fmt;

use super::ReadEnv;

/// Adapts a closure into a [`ReadEnv`].
///
/// `None` is reported as [`VarError::NotPresent`].
///
/// ```
/// use trogon_env::EnvReader;
/// use trogon_env::env::LookupFn;
///
/// let reader = EnvReader::new(LookupFn::new(|key: &str| {
///     (key == "WORKERS").then(|| "8".to_string())
/// }));
/// assert_eq!(reader.get_uint("WORKERS", 1), 8);
/// assert_eq!(reader.get_uint("THREADS", 1), 1);
/// ```
#[derive(Clone, Copy)]
pub struct LookupFn<F> {
    lookup: F,
}

impl<F> LookupFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub const fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> ReadEnv for LookupFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Result<String, VarError> {
        (self.lookup)(key).ok_or(VarError::NotPresent)
    }
}

impl<F> fmt::Debug for LookupFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupFn").finish_non_exhaustive()
    }
}
