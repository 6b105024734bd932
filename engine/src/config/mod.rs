mod content_provider;
mod manager;
mod serializer;

pub use content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use manager::ConfigManager;
pub use serializer::{ConfigSerializer, YamlConfigSerializer};

/// Implemented by every settings struct that can be loaded from disk.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
