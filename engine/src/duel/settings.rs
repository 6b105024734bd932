use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{Difficulty, GridBounds};

/// Tuning knobs for the AI. The defaults reproduce the reference behavior; switching
/// `loop_avoidance` or `lookahead_scoring` off yields the plainer strategy variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub history_length: usize,
    pub history_penalty: u32,
    pub loop_avoidance: bool,
    pub pathfinding_min_difficulty: u8,
    pub random_turn_max_difficulty: u8,
    pub random_turn_chance: f64,
    pub lookahead_scoring: bool,
    pub max_lookahead: u32,
    pub lookahead_weight: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            history_length: 20,
            history_penalty: 3,
            loop_avoidance: true,
            pathfinding_min_difficulty: 3,
            random_turn_max_difficulty: 2,
            random_turn_chance: 0.3,
            lookahead_scoring: true,
            max_lookahead: 3,
            lookahead_weight: 10,
        }
    }
}

impl Validate for AiSettings {
    fn validate(&self) -> Result<(), String> {
        if self.history_length == 0 {
            return Err("history_length must be at least 1".to_string());
        }
        if self.history_length > 1000 {
            return Err("history_length must not exceed 1000".to_string());
        }
        if !(0.0..=1.0).contains(&self.random_turn_chance) {
            return Err(format!(
                "random_turn_chance must be between 0.0 and 1.0, got {}",
                self.random_turn_chance
            ));
        }
        if self.max_lookahead > 10 {
            return Err("max_lookahead must not exceed 10".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub grid_width: u32,
    pub grid_height: u32,
    pub difficulty: Difficulty,
    pub food_count: usize,
    /// `None` picks a fresh seed per engine.
    pub seed: Option<u64>,
    pub ai: AiSettings,
}

impl EngineSettings {
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.grid_width, self.grid_height)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            difficulty: Difficulty::default(),
            food_count: 3,
            seed: None,
            ai: AiSettings::default(),
        }
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Result<(), String> {
        if self.grid_width < 2 || self.grid_height < 1 {
            return Err(format!(
                "Grid must be at least 2x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.grid_width > 1000 || self.grid_height > 1000 {
            return Err("Grid dimensions must not exceed 1000".to_string());
        }
        if self.food_count == 0 {
            return Err("food_count must be at least 1".to_string());
        }
        self.ai.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigContentProvider, ConfigManager, ConfigSerializer, FileContentConfigProvider,
        YamlConfigSerializer,
    };

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_duel_config_{}.yaml", random_number))
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineSettings::default().validate().is_ok());
        assert_eq!(EngineSettings::default().bounds(), GridBounds::new(30, 20));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = EngineSettings::default();
        settings.food_count = 0;
        assert!(settings.validate().is_err());

        let mut settings = EngineSettings::default();
        settings.grid_width = 0;
        assert!(settings.validate().is_err());

        let mut settings = EngineSettings::default();
        settings.ai.history_length = 0;
        assert!(settings.validate().is_err());

        let mut settings = EngineSettings::default();
        settings.ai.random_turn_chance = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_default_settings_yaml_round_trip() {
        let serializer = YamlConfigSerializer::new();
        let settings = EngineSettings {
            seed: Some(1234),
            ..EngineSettings::default()
        };
        let serialized = serializer.serialize(&settings).unwrap();
        let deserialized: EngineSettings = serializer.deserialize(&serialized).unwrap();
        assert_eq!(settings, deserialized);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let serializer = YamlConfigSerializer::new();
        let settings: EngineSettings = serializer
            .deserialize("difficulty: 5\nai:\n  random_turn_chance: 0.5\n")
            .unwrap();
        assert_eq!(settings.difficulty.level(), 5);
        assert_eq!(settings.ai.random_turn_chance, 0.5);
        assert_eq!(settings.ai.history_length, 20);
        assert_eq!(settings.grid_width, 30);
    }

    #[test]
    fn test_invalid_difficulty_in_yaml_is_rejected() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<EngineSettings, String> = serializer.deserialize("difficulty: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_manager_missing_file_gives_default() {
        let manager: ConfigManager<_, EngineSettings> =
            ConfigManager::from_yaml_file(get_temp_file_path());
        assert_eq!(manager.get_config().unwrap(), EngineSettings::default());
    }

    #[test]
    fn test_config_manager_file_round_trip() {
        let file_path = get_temp_file_path();
        let manager: ConfigManager<_, EngineSettings> = ConfigManager::from_yaml_file(&file_path);

        let mut settings = EngineSettings::default();
        settings.grid_width = 12;
        settings.difficulty = Difficulty::new(1).unwrap();
        manager.set_config(&settings).unwrap();

        let reloaded: ConfigManager<_, EngineSettings> = ConfigManager::from_yaml_file(&file_path);
        assert_eq!(reloaded.get_config().unwrap(), settings);

        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_config_manager_rejects_invalid_file() {
        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(&file_path);
        provider.set_config_content("food_count: 0\n").unwrap();

        let manager: ConfigManager<_, EngineSettings> = ConfigManager::from_yaml_file(&file_path);
        let result = manager.get_config();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("validation"));

        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_config_manager_refuses_to_store_invalid() {
        let file_path = get_temp_file_path();
        let manager: ConfigManager<_, EngineSettings> = ConfigManager::from_yaml_file(&file_path);
        let mut settings = EngineSettings::default();
        settings.ai.history_length = 0;
        assert!(manager.set_config(&settings).is_err());
        assert!(!file_path.exists());
    }
}
