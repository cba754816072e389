use std::env::VarError;

/// Key lookup against some environment table.
///
/// `Err(VarError::NotPresent)` means the key is absent;
/// `Err(VarError::NotUnicode(_))` means it is present but unreadable as text.
///
/// Implementors need not be `Send + Sync`. Only a reader stored in a
/// `static`, like the process-wide default, needs a `Sync` environment.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, VarError>;
}

impl<E: ReadEnv + ?Sized> ReadEnv for &E {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        (**self).var(key)
    }
}
