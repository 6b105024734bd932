use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

/// YAML on disk. An optional header is written as `#` comment lines above the document and
/// is skipped again on load.
#[derive(Default)]
pub struct YamlConfigSerializer {
    header: Option<String>,
}

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
        }
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        let body = serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
        match self.header {
            Some(ref header) => {
                let comments: String = header.lines().map(|line| format!("# {}\n", line)).collect();
                Ok(comments + &body)
            }
            None => Ok(body),
        }
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}
