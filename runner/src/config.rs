use std::path::Path;

use serde::{Deserialize, Serialize};
use snake_duel_engine::EngineSettings;
use snake_duel_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "snake_duel.yaml";
const CONFIG_FILE_HEADER: &str = "snake_duel runner configuration\nMissing keys fall back to their defaults.";

pub fn get_config_manager(path: &Path) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::new(
        FileContentConfigProvider::new(path),
        YamlConfigSerializer::with_header(CONFIG_FILE_HEADER),
    )
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    /// 0 runs until the round ends.
    pub max_ticks: u64,
    pub log_every: u64,
    /// Pace ticks by the difficulty's interval instead of running flat out.
    pub realtime: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        if self.log_every == 0 {
            return Err("log_every must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            max_ticks: 0,
            log_every: 25,
            realtime: true,
        }
    }
}
