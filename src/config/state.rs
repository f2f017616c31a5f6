// Application state module
// Shared, read-only view of the configuration plus the record store

use super::types::Config;
use crate::record::RecordStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: RecordStore,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: RecordStore::new(&config.storage.output_dir, &config.storage.file_name),
        }
    }
}
