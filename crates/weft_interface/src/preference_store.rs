//! Key-value storage for table preferences.

use weft_error::StorageError;

/// String key-value store, the equivalent of browser local storage.
pub trait PreferenceStore: Send + Sync {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
