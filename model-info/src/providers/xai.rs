//! xAI adapter: reads `/language-models` with a bearer key.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::ModelInfoProvider;
use crate::error::ModelInfoError;
use crate::http::{endpoint, fetch_json, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::model::{ModelFeature, ModelInfo, ModelProvider, ModelType};

/// Default xAI API base URL.
pub const XAI_BASE_URL: &str = "https://api.x.ai/v1";

/// Vision variants have a smaller context window than the rest of the family.
const VISION_PREFIX: &str = "grok-2-vision";
const VISION_MAX_INPUT_TOKENS: u64 = 32_768;
const DEFAULT_MAX_INPUT_TOKENS: u64 = 131_072;

#[derive(Debug, Deserialize)]
struct LanguageModelsResponse {
    models: Vec<LanguageModel>,
}

/// Prices are in cents per million tokens.
#[derive(Debug, Deserialize)]
struct LanguageModel {
    id: String,
    #[serde(default)]
    input_modalities: Vec<String>,
    #[serde(default)]
    prompt_text_token_price: f64,
    #[serde(default)]
    completion_text_token_price: f64,
    #[serde(default)]
    aliases: Vec<String>,
}

/// Reads language models from the xAI API.
pub struct XaiProvider {
    base_url: String,
    api_key: String,
    http_client: Arc<dyn HttpClient>,
}

impl XaiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(XAI_BASE_URL, api_key, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http_client,
        }
    }

    fn request(&self, segments: &[&str]) -> Result<HttpRequest, ModelInfoError> {
        let url = endpoint(&self.base_url, segments)?;
        Ok(HttpRequest::get(url).with_bearer_auth(&self.api_key))
    }

    fn map_model_info(model: LanguageModel) -> ModelInfo {
        let has_text = model.input_modalities.iter().any(|m| m == "text");
        let has_image = model.input_modalities.iter().any(|m| m == "image");

        let model_type = if has_text {
            ModelType::Chat
        } else {
            ModelType::Other
        };
        let max_input_tokens = if model.id.starts_with(VISION_PREFIX) {
            VISION_MAX_INPUT_TOKENS
        } else {
            DEFAULT_MAX_INPUT_TOKENS
        };
        let mut features = vec![
            ModelFeature::JsonOutput,
            ModelFeature::ToolCalling,
            ModelFeature::ToolChoice,
            ModelFeature::StructuredOutput,
        ];
        if has_image {
            features.push(ModelFeature::Vision);
        }

        let mut info = ModelInfo::new(model.id, ModelProvider::XAI, model_type)
            .with_max_input_tokens(Some(max_input_tokens))
            .with_costs(
                cost_per_token(model.prompt_text_token_price),
                cost_per_token(model.completion_text_token_price),
            )
            .with_features(features);
        if !model.aliases.is_empty() {
            info = info.with_metadata(
                "aliases",
                Value::Array(model.aliases.into_iter().map(Value::String).collect()),
            );
        }
        info
    }
}

/// Cents per million tokens → dollars per token.
fn cost_per_token(cents_per_million: f64) -> f64 {
    (cents_per_million / 100.0) / 1_000_000.0
}

#[async_trait]
impl ModelInfoProvider for XaiProvider {
    fn name(&self) -> &str {
        "xai"
    }

    fn supported_providers(&self) -> Vec<ModelProvider> {
        vec![ModelProvider::XAI]
    }

    async fn get_model_infos(&self, provider: ModelProvider) -> Result<Vec<ModelInfo>, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let body: LanguageModelsResponse =
            fetch_json(self.http_client.as_ref(), self.request(&["language-models"])?).await?;
        Ok(body.models.into_iter().map(Self::map_model_info).collect())
    }

    async fn get_model_info(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let request = self.request(&["language-models", model])?;
        let body: LanguageModel = fetch_json(self.http_client.as_ref(), request).await?;
        Ok(Self::map_model_info(body))
    }
}
