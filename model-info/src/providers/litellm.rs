//! LiteLLM adapter: one static price/capability document covering every hosted provider.
//!
//! Keys look like `"xai/grok-2-latest"` or bare `"gpt-4o"`; each entry declares its
//! provider in `litellm_provider`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::ModelInfoProvider;
use crate::cache::Cache;
use crate::error::ModelInfoError;
use crate::http::{fetch_json, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::model::{ModelFeature, ModelInfo, ModelProvider, ModelType};

/// Public LiteLLM pricing and context-window catalog.
pub const LITELLM_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/BerriAI/litellm/main/model_prices_and_context_window.json";

/// Boolean catalog flags and the features each one grants.
const FEATURE_FLAGS: [(&str, &[ModelFeature]); 9] = [
    (
        "supports_response_schema",
        &[ModelFeature::StructuredOutput, ModelFeature::JsonOutput],
    ),
    ("supports_function_calling", &[ModelFeature::ToolCalling]),
    ("supports_vision", &[ModelFeature::Vision]),
    ("supports_tool_choice", &[ModelFeature::ToolChoice]),
    ("supports_reasoning", &[ModelFeature::Reasoning]),
    ("supports_web_search", &[ModelFeature::WebSearch]),
    ("supports_prompt_caching", &[ModelFeature::PromptCaching]),
    ("supports_audio_input", &[ModelFeature::AudioInput]),
    ("supports_audio_output", &[ModelFeature::AudioOutput]),
];

/// Cache key segment of the downloaded document, after the namespace.
pub(crate) const CATALOG_CACHE_SEGMENT: &str = "litellm.";

struct CatalogCache {
    cache: Arc<dyn Cache>,
    key: String,
    ttl: Option<Duration>,
}

/// Reads the LiteLLM catalog; serves every provider except [`ModelProvider::Custom`].
///
/// The document is downloaded on every call unless [`LiteLlmProvider::with_cache`]
/// is used, in which case the raw document is kept in the given cache.
pub struct LiteLlmProvider {
    url: String,
    http_client: Arc<dyn HttpClient>,
    catalog_cache: Option<CatalogCache>,
}

impl LiteLlmProvider {
    pub fn new() -> Self {
        Self::with_url(LITELLM_CATALOG_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self::with_client(url, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_client(url: impl Into<String>, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            url: url.into(),
            http_client,
            catalog_cache: None,
        }
    }

    /// Keeps the downloaded document under `"<namespace>.litellm.catalog"`.
    pub fn with_cache(mut self, cache: Arc<dyn Cache>, namespace: &str, ttl: Option<Duration>) -> Self {
        self.catalog_cache = Some(CatalogCache {
            cache,
            key: format!("{}.{}catalog", namespace, CATALOG_CACHE_SEGMENT),
            ttl,
        });
        self
    }

    async fn catalog(&self) -> Result<Map<String, Value>, ModelInfoError> {
        if let Some(cached) = &self.catalog_cache {
            if let Some(Value::Object(document)) = cached.cache.get(&cached.key).await {
                tracing::debug!(key = %cached.key, "litellm catalog cache hit");
                return Ok(document);
            }
        }

        let document: Map<String, Value> =
            fetch_json(self.http_client.as_ref(), HttpRequest::get(&self.url)).await?;

        if let Some(cached) = &self.catalog_cache {
            if let Err(e) = cached
                .cache
                .set(&cached.key, Value::Object(document.clone()), cached.ttl)
                .await
            {
                tracing::warn!(key = %cached.key, error = %e, "failed to cache litellm catalog");
            }
        }
        Ok(document)
    }
}

impl Default for LiteLlmProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog entries declared for `provider`, in document order. Entries that are not
/// objects or carry no `litellm_provider` (such as `sample_spec`) are skipped.
fn entries_for(
    document: &Map<String, Value>,
    provider: ModelProvider,
) -> impl Iterator<Item = (&String, &Map<String, Value>)> {
    document.iter().filter_map(move |(key, value)| {
        let entry = value.as_object()?;
        let declared = entry.get("litellm_provider")?.as_str()?;
        (declared == provider.as_str()).then_some((key, entry))
    })
}

fn bare_name(provider: ModelProvider, key: &str) -> &str {
    key.strip_prefix(provider.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(key)
}

fn model_type(mode: &str) -> ModelType {
    match mode {
        "chat" => ModelType::Chat,
        "completion" => ModelType::Completion,
        "embedding" => ModelType::Embedding,
        "image_generation" => ModelType::ImageGeneration,
        "audio_speech" => ModelType::TextToSpeech,
        "audio_transcription" => ModelType::SpeechToText,
        "moderation" => ModelType::Moderation,
        _ => ModelType::Other,
    }
}

fn features(entry: &Map<String, Value>) -> Vec<ModelFeature> {
    FEATURE_FLAGS
        .iter()
        .filter(|(flag, _)| entry.get(*flag).and_then(Value::as_bool).unwrap_or(false))
        .flat_map(|(_, granted)| granted.iter().copied())
        .collect()
}

fn token_count(entry: &Map<String, Value>, field: &str) -> Option<u64> {
    let value = entry.get(field)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
}

fn cost(entry: &Map<String, Value>, field: &str) -> f64 {
    entry.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

fn map_model_info(provider: ModelProvider, key: &str, entry: &Map<String, Value>) -> ModelInfo {
    let mode = entry.get("mode").and_then(Value::as_str).unwrap_or_default();
    let deprecation_date = entry.get("deprecation_date").filter(|v| !v.is_null());

    let mut info = ModelInfo::new(bare_name(provider, key), provider, model_type(mode))
        .with_max_input_tokens(token_count(entry, "max_input_tokens"))
        .with_max_output_tokens(token_count(entry, "max_output_tokens"))
        .with_costs(
            cost(entry, "input_cost_per_token"),
            cost(entry, "output_cost_per_token"),
        )
        .with_features(features(entry))
        .with_deprecated(deprecation_date.is_some());
    if let Some(date) = deprecation_date {
        info = info.with_metadata("deprecation_date", date.clone());
    }
    info
}

#[async_trait]
impl ModelInfoProvider for LiteLlmProvider {
    fn name(&self) -> &str {
        "litellm"
    }

    fn supported_providers(&self) -> Vec<ModelProvider> {
        ModelProvider::all()
            .iter()
            .copied()
            .filter(|p| *p != ModelProvider::Custom)
            .collect()
    }

    async fn get_model_infos(&self, provider: ModelProvider) -> Result<Vec<ModelInfo>, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let document = self.catalog().await?;
        let infos = entries_for(&document, provider)
            .map(|(key, entry)| map_model_info(provider, key, entry))
            .collect();
        Ok(infos)
    }

    async fn get_model_info(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        let document = self.catalog().await?;
        let wanted = bare_name(provider, model);
        let found = entries_for(&document, provider)
            .find(|(key, _)| bare_name(provider, key) == wanted)
            .map(|(key, entry)| map_model_info(provider, key, entry));
        found.ok_or_else(|| ModelInfoError::model_not_found(provider, model))
    }
}
