//! Application settings and configuration

use crate::{storage::data_file::DEFAULT_DATA_FILE, Error, Result};
use serde::{Deserialize, Serialize};

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "quickchat_settings.json";

/// Application settings
///
/// Settings are stored in JSON format and can be loaded/saved from disk.
/// Missing keys take their default values.
///
/// # Example
/// ```rust,no_run
/// use quickchat::storage::Settings;
///
/// // Load settings (returns default if file doesn't exist)
/// let mut settings = Settings::load("quickchat_settings.json").expect("Failed to load");
///
/// settings.data_file = "messages/quickChatData.json".to_string();
/// settings.save("quickchat_settings.json").expect("Failed to save");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the JSON data file holding sent and stored messages
    pub data_file: String,
    /// Load the data file when a messaging session starts
    pub load_on_start: bool,
    /// Message quota offered when a session starts (0 asks the user)
    pub default_message_limit: u32,
}

impl Settings {
    /// Load settings from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the settings file
    ///
    /// # Returns
    /// The loaded settings, or default settings if the file doesn't exist or is empty.
    /// A blank `data_file` falls back to the default data file name.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("Failed to read settings: {}", e)))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut settings: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Storage(format!("Failed to parse settings: {}", e)))?;

        settings.normalize_data_file();

        Ok(settings)
    }

    /// Save settings to a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to save the settings file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create settings directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Storage(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, json)
            .map_err(|e| Error::Storage(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Fall back to [`DEFAULT_DATA_FILE`] when the configured data file is blank
    fn normalize_data_file(&mut self) {
        let trimmed = self.data_file.trim();
        if trimmed.is_empty() {
            tracing::warn!("Settings name no data file, using {}", DEFAULT_DATA_FILE);
            self.data_file = DEFAULT_DATA_FILE.to_string();
        } else if trimmed.len() != self.data_file.len() {
            self.data_file = trimmed.to_string();
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            load_on_start: true,
            default_message_limit: 0,
        }
    }
}
