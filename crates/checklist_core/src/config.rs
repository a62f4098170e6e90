//! Runtime configuration for the checklist core.
//!
//! # Responsibility
//! - Carry the few knobs the core needs, with defaults matching the app.
//! - Allow environment overrides for local diagnostics.

/// Slot key the mobile app has always written its snapshot under.
pub const DEFAULT_STORAGE_KEY: &str = "@GeoRemindData";

/// Environment variable overriding [`CoreConfig::storage_key`].
pub const STORAGE_KEY_ENV: &str = "CHECKLIST_STORAGE_KEY";

const DEFAULT_WRITER_THREAD_NAME: &str = "checklist-persist";

/// Core settings shared by sync and service layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Key of the single slot holding the serialized collection.
    pub storage_key: String,
    /// Name given to the background snapshot writer thread.
    pub writer_thread_name: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            writer_thread_name: DEFAULT_WRITER_THREAD_NAME.to_string(),
        }
    }
}

impl CoreConfig {
    /// Builds the default config, then applies non-empty env overrides.
    pub fn from_env() -> Self {
        Self::default().with_storage_key_override(std::env::var(STORAGE_KEY_ENV).ok())
    }

    /// Replaces the storage key when `raw` holds a non-blank value.
    pub fn with_storage_key_override(mut self, raw: Option<String>) -> Self {
        if let Some(value) = raw {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                self.storage_key = trimmed.to_string();
            }
        }
        self
    }
}
