use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info, warn};
use crate::card::{CardError, ModelArtifact};
use crate::config::HubConfig;
use super::outline::{architecture_outline, config_dump};
use super::ArtifactProvider;

/// Loads model configurations from a Hugging Face compatible hub.
///
/// Only `config.json` is fetched; weights are never downloaded. Fetched
/// configs are kept under the cache directory and reused on later runs.
pub struct HubProvider {
    settings: HubConfig,
    client: Client,
}

impl HubProvider {
    pub fn new(settings: HubConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("modelcard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { settings, client })
    }

    /// Hub repository id for a model name, e.g. `h2oai/h2ogpt-oasst1-256-20b`.
    pub fn repo_id(&self, model_name: &str) -> String {
        if self.settings.namespace.is_empty() {
            model_name.to_string()
        } else {
            format!("{}/{}", self.settings.namespace, model_name)
        }
    }

    /// Where the fetched `config.json` of `model_name` is cached.
    pub fn cache_path(&self, model_name: &str) -> PathBuf {
        self.settings.cache_dir.join(self.repo_id(model_name)).join("config.json")
    }

    pub fn config_url(&self, model_name: &str) -> String {
        format!(
            "{}/{}/resolve/{}/config.json",
            self.settings.endpoint.trim_end_matches('/'),
            self.repo_id(model_name),
            self.settings.revision
        )
    }

    fn fetch(&self, model_name: &str) -> Result<String, CardError> {
        let url = self.config_url(model_name);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message(format!("Fetching {}...", self.repo_id(model_name)));

        info!("Fetching {}", url);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.settings.token {
            request = request.bearer_auth(token);
        }

        let result = request
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| CardError::artifact(model_name, format!("{}: {}", url, e)));

        pb.finish_and_clear();
        result
    }

    fn read_config(&self, model_name: &str) -> Result<Value, CardError> {
        let cache = self.cache_path(model_name);
        if cache.is_file() {
            debug!("Using cached config {}", cache.display());
            let raw = fs::read_to_string(&cache)
                .map_err(|e| CardError::artifact(model_name, format!("{}: {}", cache.display(), e)))?;
            return parse_config(&raw)
                .map_err(|reason| CardError::artifact(model_name, format!("cached {}: {}", cache.display(), reason)));
        }

        if self.settings.offline {
            return Err(CardError::artifact(
                model_name,
                format!("offline mode and no cached config at {}", cache.display()),
            ));
        }

        let raw = self.fetch(model_name)?;
        self.accept_fetched(model_name, &raw)
    }

    /// Validates a fetched `config.json` and caches it. Invalid bodies are never cached.
    fn accept_fetched(&self, model_name: &str, raw: &str) -> Result<Value, CardError> {
        let config = parse_config(raw)
            .map_err(|reason| CardError::artifact(model_name, format!("config.json {}", reason)))?;

        let cache = self.cache_path(model_name);
        if let Some(parent) = cache.parent() {
            if let Err(e) = fs::create_dir_all(parent).and_then(|_| fs::write(&cache, raw)) {
                warn!("Could not cache config at {}: {}", cache.display(), e);
            }
        }
        Ok(config)
    }
}

/// Parses a `config.json` body, which must be a JSON object.
fn parse_config(raw: &str) -> Result<Value, String> {
    let config: Value = serde_json::from_str(raw).map_err(|e| format!("is not valid JSON: {}", e))?;
    if !config.is_object() {
        return Err("is not a JSON object".to_string());
    }
    Ok(config)
}

impl ArtifactProvider for HubProvider {
    fn name(&self) -> &str {
        "hub"
    }

    fn load(&self, model_name: &str) -> Result<ModelArtifact, CardError> {
        let config = self.read_config(model_name)?;
        Ok(ModelArtifact {
            arch_text: architecture_outline(&config),
            config_text: config_dump(&config),
        })
    }
}
