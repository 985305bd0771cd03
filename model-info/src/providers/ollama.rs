//! Ollama adapter: local runtime that tags models with capability strings.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{scale_context_length, ModelInfoProvider};
use crate::error::ModelInfoError;
use crate::http::{fetch_json, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::model::{ModelFeature, ModelInfo, ModelProvider, ModelType};

/// Default Ollama host.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// `POST /api/show` payload. `model_info` keys are architecture-prefixed,
/// e.g. `llama.context_length`.
#[derive(Debug, Default, Deserialize)]
struct ShowResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    model_info: Option<Map<String, Value>>,
    #[serde(default)]
    capabilities: Option<Vec<String>>,
}

/// Reads models from a local Ollama server (`/api/tags`, `/api/show`).
pub struct OllamaProvider {
    host: String,
    http_client: Arc<dyn HttpClient>,
}

impl OllamaProvider {
    /// Default host and reqwest client.
    pub fn new() -> Self {
        Self::with_host(DEFAULT_OLLAMA_HOST)
    }

    pub fn with_host(host: impl Into<String>) -> Self {
        Self::with_client(host, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_client(host: impl Into<String>, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    fn map_model_info(name: String, show: ShowResponse) -> ModelInfo {
        let capabilities = show.capabilities.unwrap_or_default();
        let max_input_tokens = show.model_info.as_ref().and_then(max_input_tokens);
        ModelInfo::new(name, ModelProvider::Ollama, model_type(&capabilities))
            .with_max_input_tokens(max_input_tokens)
            .with_features(features(&capabilities))
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn has(capabilities: &[String], capability: &str) -> bool {
    capabilities.iter().any(|c| c == capability)
}

fn model_type(capabilities: &[String]) -> ModelType {
    if has(capabilities, "completion") {
        ModelType::Chat
    } else if has(capabilities, "embedding") {
        ModelType::Embedding
    } else {
        ModelType::Other
    }
}

fn features(capabilities: &[String]) -> Vec<ModelFeature> {
    let mut features = Vec::new();
    if has(capabilities, "completion") {
        features.extend([ModelFeature::JsonOutput, ModelFeature::StructuredOutput]);
    }
    if has(capabilities, "vision") {
        features.push(ModelFeature::Vision);
    }
    if has(capabilities, "tools") {
        features.extend([ModelFeature::ToolCalling, ModelFeature::ToolChoice]);
    }
    features
}

/// First `*.context_length` key in map order; non-numeric → `None`.
fn max_input_tokens(model_info: &Map<String, Value>) -> Option<u64> {
    let (_, raw) = model_info
        .iter()
        .find(|(key, _)| key.ends_with(".context_length"))?;
    let raw = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    scale_context_length(raw)
}

#[async_trait]
impl ModelInfoProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn supported_providers(&self) -> Vec<ModelProvider> {
        vec![ModelProvider::Ollama]
    }

    async fn get_model_infos(&self, provider: ModelProvider) -> Result<Vec<ModelInfo>, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let request = HttpRequest::get(format!("{}/api/tags", self.host));
        let tags: TagsResponse = fetch_json(self.http_client.as_ref(), request).await?;
        Ok(tags
            .models
            .into_iter()
            .map(|entry| Self::map_model_info(entry.name, ShowResponse::default()))
            .collect())
    }

    async fn get_model_info(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let request = HttpRequest::post_json(format!("{}/api/show", self.host), json!({ "model": model }));
        let mut show: ShowResponse = fetch_json(self.http_client.as_ref(), request).await?;
        let name = show.name.take().unwrap_or_else(|| model.to_string());
        Ok(Self::map_model_info(name, show))
    }
}
