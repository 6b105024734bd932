use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and hands out clones of the cached value.
pub struct ConfigManager<TProvider, TConfig, TSerializer = YamlConfigSerializer>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TSerializer: ConfigSerializer<TConfig>,
{
    serializer: TSerializer,
    provider: TProvider,
    cached: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TProvider, TConfig, TSerializer> ConfigManager<TProvider, TConfig, TSerializer>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(provider: TProvider, serializer: TSerializer) -> Self {
        Self {
            serializer,
            provider,
            cached: Mutex::new(None),
        }
    }

    /// Falls back to `TConfig::default()` when nothing is stored. The default is not cached,
    /// so a file written later is still picked up.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = self.serializer.serialize(config)?;
        self.provider.set_config_content(&content)?;

        let mut cached = self
            .cached
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *cached = Some(config.clone());
        Ok(())
    }
}
