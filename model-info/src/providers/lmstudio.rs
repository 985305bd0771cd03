//! LM Studio adapter: local runtime whose REST API reports a `type` per model.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{scale_context_length, ModelInfoProvider};
use crate::error::ModelInfoError;
use crate::http::{endpoint, fetch_json, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::model::{ModelFeature, ModelInfo, ModelProvider, ModelType};

/// Default LM Studio host.
pub const DEFAULT_LMSTUDIO_HOST: &str = "http://localhost:1234";

/// Fields copied into [`ModelInfo::metadata`] when present.
const METADATA_FIELDS: [&str; 5] = ["publisher", "arch", "compatibility_type", "quantization", "state"];

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<LmStudioModel>,
}

#[derive(Debug, Deserialize)]
struct LmStudioModel {
    id: String,
    #[serde(rename = "type", default)]
    model_type: Option<String>,
    #[serde(default)]
    max_context_length: Option<f64>,
    #[serde(flatten)]
    extra: serde_json::Map<String, Value>,
}

/// Reads models from LM Studio's REST API (`/api/v0/models`).
pub struct LmStudioProvider {
    host: String,
    http_client: Arc<dyn HttpClient>,
}

impl LmStudioProvider {
    pub fn new() -> Self {
        Self::with_host(DEFAULT_LMSTUDIO_HOST)
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

    fn map_model_info(model: LmStudioModel) -> ModelInfo {
        let kind = model.model_type.as_deref().unwrap_or_default();
        let mut info = ModelInfo::new(model.id, ModelProvider::LMStudio, model_type(kind))
            .with_max_input_tokens(model.max_context_length.and_then(scale_context_length))
            .with_features(features(kind));
        for field in METADATA_FIELDS {
            if let Some(value) = model.extra.get(field).filter(|v| !v.is_null()) {
                info = info.with_metadata(field, value.clone());
            }
        }
        info
    }
}

impl Default for LmStudioProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn model_type(kind: &str) -> ModelType {
    match kind {
        "llm" => ModelType::Chat,
        "embeddings" => ModelType::Embedding,
        _ => ModelType::Other,
    }
}

fn features(kind: &str) -> Vec<ModelFeature> {
    if kind == "llm" {
        vec![ModelFeature::JsonOutput, ModelFeature::StructuredOutput]
    } else {
        Vec::new()
    }
}

#[async_trait]
impl ModelInfoProvider for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    fn supported_providers(&self) -> Vec<ModelProvider> {
        vec![ModelProvider::LMStudio]
    }

    async fn get_model_infos(&self, provider: ModelProvider) -> Result<Vec<ModelInfo>, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let request = HttpRequest::get(endpoint(&self.host, &["api", "v0", "models"])?);
        let body: ModelsResponse = fetch_json(self.http_client.as_ref(), request).await?;
        Ok(body.data.into_iter().map(Self::map_model_info).collect())
    }

    async fn get_model_info(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let request = HttpRequest::get(endpoint(&self.host, &["api", "v0", "models", model])?);
        let body: LmStudioModel = fetch_json(self.http_client.as_ref(), request).await?;
        Ok(Self::map_model_info(body))
    }
}
