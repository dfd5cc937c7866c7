//! Preference command handler.

use super::PrefsCommands;
use std::path::PathBuf;
use std::sync::Arc;
use weft::{FilePreferenceStore, TablePreferences};

/// Handles the prefs commands.
#[tracing::instrument(skip_all)]
pub fn handle_prefs_command(dir: Option<PathBuf>, command: PrefsCommands) -> anyhow::Result<()> {
    let store = match dir {
        Some(dir) => FilePreferenceStore::new(dir),
        None => FilePreferenceStore::in_config_dir()?,
    };
    tracing::debug!(dir = %store.dir().display(), "Using preference store");
    let store = Arc::new(store);

    match command {
        PrefsCommands::Show { page_type } => {
            let prefs = TablePreferences::new(page_type.as_str(), Vec::new(), store);
            match prefs.load() {
                Some(preference) => println!("{}", serde_json::to_string_pretty(&preference)?),
                None => println!("No stored preferences for '{}'", page_type),
            }
        }
        PrefsCommands::Reset { page_type } => {
            let prefs = TablePreferences::new(page_type.as_str(), Vec::new(), store);
            prefs.reset_to_default()?;
            println!("Reset preferences for '{}'", page_type);
        }
    }
    Ok(())
}
