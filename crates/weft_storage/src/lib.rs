//! Table preference persistence for the Weft data-table cache.
//!
//! Column visibility, order and width chosen by a user are stored per table
//! page under `table-preference-{page_type}` in a [`PreferenceStore`].
//!
//! [`PreferenceStore`]: weft_interface::PreferenceStore

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod file_store;
mod memory_store;
mod preferences;

pub use file_store::FilePreferenceStore;
pub use memory_store::MemoryPreferenceStore;
pub use preferences::{TablePreferences, storage_key};
