use crate::error::{Result, TodoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_SLOT_NAME: &str = "flux-backbone-todo";

/// Configuration for fluxtodo, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoConfig {
    /// Name of the storage slot the todo list is persisted under
    #[serde(default = "default_slot_name")]
    pub slot_name: String,
}

fn default_slot_name() -> String {
    DEFAULT_SLOT_NAME.to_string()
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            slot_name: default_slot_name(),
        }
    }
}

impl TodoConfig {
    pub const KEYS: &'static [&'static str] = &["slot-name"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodoError::Io)?;
        let config: TodoConfig =
            serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodoError::Serialization)?;
        fs::write(config_path, content).map_err(TodoError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "slot-name" => Some(self.slot_name.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "slot-name" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("slot-name cannot be empty".to_string());
                }
                self.slot_name = value.to_string();
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
