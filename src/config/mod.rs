// Required external crates for configuration management and serialization
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File};
use crate::card::ModelSpec;

/// Location of the card template
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    /// Path of the template file
    pub path: PathBuf,
}

/// Where generated cards go
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Root directory; each card lands in `<directory>/<model_name>/README.md`
    pub directory: PathBuf,
}

/// Settings for fetching model configurations from the hub
#[derive(Debug, Deserialize, Clone)]
pub struct HubConfig {
    /// Base URL of the hub
    pub endpoint: String,
    /// Organisation prepended to model names to form repository ids
    pub namespace: String,
    /// Branch, tag or commit to read from
    pub revision: String,
    /// Directory for cached `config.json` files
    pub cache_dir: PathBuf,
    /// Only use cached configs, never touch the network
    pub offline: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional access token for gated or private repositories
    pub token: Option<String>,
}

/// Settings for reading local GGUF files
#[derive(Debug, Deserialize, Clone)]
pub struct GgufConfig {
    /// Directory holding `<model_name>.gguf` files
    pub directory: PathBuf,
}

/// Which artifact provider supplies architecture and config text
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Hub,
    Gguf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Optional log directory
    pub file: Option<PathBuf>,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub template: TemplateConfig,
    pub output: OutputConfig,
    pub hub: HubConfig,
    pub gguf: GgufConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
    /// Model releases to document
    #[serde(default)]
    pub models: Vec<ModelSpec>,
}

/// Implementation for loading and parsing configuration
impl Settings {
    /// Creates a new Settings instance by loading config from multiple sources
    /// in the following order of precedence (highest to lowest):
    /// 1. Environment variables prefixed with MODELCARD_ (nested keys separated by `__`)
    /// 2. Local config file (local.toml) if present
    /// 3. Default config file (default.toml)
    pub fn from_dir(config_dir: &Path) -> Result<Self, ConfigError> {
        if !config_dir.exists() {
            return Err(ConfigError::Message(
                format!("Config directory not found at: {}", config_dir.display())
            ));
        }

        let default_config = config_dir.join("default.toml");
        if !default_config.exists() {
            return Err(ConfigError::Message(
                format!("Default configuration file not found at: {}", default_config.display())
            ));
        }

        let local_config = config_dir.join("local.toml");

        let settings = Config::builder()
            .add_source(File::from(default_config))
            .add_source(File::from(local_config).required(false))
            .add_source(
                Environment::with_prefix("MODELCARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.template.path.as_os_str().is_empty() {
            return Err(ConfigError::Message("template.path must not be empty".to_string()));
        }

        if self.hub.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "hub.timeout_secs must be greater than 0".to_string()
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        let mut seen = HashSet::new();
        for spec in &self.models {
            let fields = [
                ("model_name", &spec.model_name),
                ("base_model", &spec.base_model),
                ("dataset", &spec.dataset),
                ("training_logs", &spec.training_logs),
            ];
            if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
                return Err(ConfigError::Message(
                    format!("Model entry '{}' has an empty {}", spec.model_name, field)
                ));
            }
            if !seen.insert(spec.model_name.as_str()) {
                return Err(ConfigError::Message(
                    format!("Model '{}' is listed more than once", spec.model_name)
                ));
            }
        }

        Ok(())
    }

    /// Configured specs, restricted to `only` when it is non-empty.
    ///
    /// Names in `only` that match no configured model are returned as the error.
    pub fn selected_models(&self, only: &[String]) -> Result<Vec<ModelSpec>, Vec<String>> {
        if only.is_empty() {
            return Ok(self.models.clone());
        }
        let unknown: Vec<String> = only
            .iter()
            .filter(|name| !self.models.iter().any(|m| &m.model_name == *name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(unknown);
        }
        Ok(self
            .models
            .iter()
            .filter(|m| only.contains(&m.model_name))
            .cloned()
            .collect())
    }
}
