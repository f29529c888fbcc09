//! Persisted preference store abstraction
//!
//! Read-only from the watch face's point of view. Values are written by a
//! separate configuration UI; the watch face reads them once each time it
//! becomes visible.

use thiserror_no_std::Error;

/// Read-only key-value preference store.
pub trait PreferenceStore {
    /// Read an integer value. `Ok(None)` when the key is absent.
    fn get_int(&self, key: &str) -> Result<Option<i32>, PreferenceError>;

    /// Read a boolean value. `Ok(None)` when the key is absent.
    fn get_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError>;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for &P {
    fn get_int(&self, key: &str) -> Result<Option<i32>, PreferenceError> {
        (**self).get_int(key)
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError> {
        (**self).get_bool(key)
    }
}

/// Preference store failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreferenceError {
    /// The stored value exists but has a different type.
    #[error("preference value has the wrong type")]
    TypeMismatch,
    /// The backing store could not be read.
    #[error("preference store unavailable")]
    Unavailable,
}

impl PreferenceError {
    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type-mismatch",
            Self::Unavailable => "unavailable",
        }
    }
}
