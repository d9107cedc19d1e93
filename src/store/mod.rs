mod record;
mod sqlite;

use crate::error::StorageError;

pub use record::{Preference, PreferenceRecord};
pub use sqlite::SqlitePreferenceStore;

/// Insert-only log of form submissions keyed by user name.
pub trait PreferenceStore: Send + Sync {
    /// Appends a record. Earlier records for the same name are kept.
    fn save(&self, name: &str, topic: &str, level: u8) -> Result<(), StorageError>;

    /// Most recently saved preference for `name`, if any.
    fn lookup(&self, name: &str) -> Result<Option<Preference>, StorageError>;

    /// Every record in insertion order.
    fn list_all(&self) -> Result<Vec<PreferenceRecord>, StorageError>;
}
