//! Caching façade over [`ProviderRegistry`].
//!
//! Two call conventions share one code path: the `*_or_fail` methods return
//! [`ModelInfoError`], the plain ones log it and return an empty list or `None`.
//! Only successful lookups are written to the cache.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{Cache, NullCache};
use crate::error::ModelInfoError;
use crate::model::{ModelInfo, ModelProvider};
use crate::providers::{ModelInfoProvider, CATALOG_CACHE_SEGMENT};
use crate::registry::ProviderRegistry;

/// Default prefix of every cache key written by the factory.
pub const DEFAULT_CACHE_NAMESPACE: &str = "model-info";

/// Looks up models through a [`ProviderRegistry`], remembering results in a [`Cache`].
///
/// Each lookup does at most one cache read and one cache write. Cache failures are
/// logged and treated as a miss or a skipped write; they never fail a lookup.
pub struct ModelInfoFactory {
    registry: ProviderRegistry,
    cache: Arc<dyn Cache>,
    namespace: String,
    ttl: Option<Duration>,
}

impl ModelInfoFactory {
    pub fn new(registry: ProviderRegistry, cache: Arc<dyn Cache>) -> Self {
        Self {
            registry,
            cache,
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            ttl: None,
        }
    }

    /// Given adapters and no cache.
    pub fn with_adapters(adapters: Vec<Arc<dyn ModelInfoProvider>>) -> Self {
        Self::new(ProviderRegistry::new(adapters), Arc::new(NullCache))
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// TTL applied to every cache write; `None` keeps entries until flushed.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `"<namespace>.models.<provider>"`
    pub fn models_cache_key(&self, provider: ModelProvider) -> String {
        format!("{}.models.{}", self.namespace, provider)
    }

    /// `"<namespace>.model-info.<provider>.<model>"`
    pub fn model_info_cache_key(&self, provider: ModelProvider, model: &str) -> String {
        format!("{}.model-info.{}.{}", self.namespace, provider, model)
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache.get(key).await?;
        match serde_json::from_value(value) {
            Ok(hit) => {
                tracing::debug!(key, "model info cache hit");
                Some(hit)
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring undecodable model info cache entry");
                None
            }
        }
    }

    async fn remember<T: Serialize + Sync>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to encode model info for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set(key, value, self.ttl).await {
            tracing::warn!(key, error = %e, "failed to write model info cache");
        }
    }

    /// Model names for `provider`, from cache or the first supporting adapter.
    pub async fn get_models_or_fail(&self, provider: ModelProvider) -> Result<Vec<String>, ModelInfoError> {
        let key = self.models_cache_key(provider);
        if let Some(models) = self.cached(&key).await {
            return Ok(models);
        }
        tracing::debug!(key = %key, "model info cache miss");
        let models = self.registry.models_or_fail(provider).await?;
        self.remember(&key, &models).await;
        Ok(models)
    }

    pub async fn get_model_info_or_fail(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError> {
        let key = self.model_info_cache_key(provider, model);
        if let Some(info) = self.cached(&key).await {
            return Ok(info);
        }
        tracing::debug!(key = %key, "model info cache miss");
        let info = self.registry.model_info_or_fail(provider, model).await?;
        self.remember(&key, &info).await;
        Ok(info)
    }

    /// Never fails; any [`ModelInfoError`] becomes an empty list.
    pub async fn get_models(&self, provider: ModelProvider) -> Vec<String> {
        match self.get_models_or_fail(provider).await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "model list unavailable");
                Vec::new()
            }
        }
    }

    /// Never fails; any [`ModelInfoError`] becomes `None`.
    pub async fn get_model_info(&self, provider: ModelProvider, model: &str) -> Option<ModelInfo> {
        match self.get_model_info_or_fail(provider, model).await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(provider = %provider, model, error = %e, "model info unavailable");
                None
            }
        }
    }

    /// Drops every model list, model info entry and cached LiteLLM catalog under this
    /// namespace, so the next lookup goes upstream.
    ///
    /// Returns false when the cache reported a failure (already logged).
    pub async fn flush_cache(&self) -> bool {
        let mut flushed = true;
        for prefix in [
            format!("{}.models.", self.namespace),
            format!("{}.model-info.", self.namespace),
            format!("{}.{}", self.namespace, CATALOG_CACHE_SEGMENT),
        ] {
            if let Err(e) = self.cache.delete_prefix(&prefix).await {
                tracing::warn!(prefix = %prefix, error = %e, "failed to flush model info cache");
                flushed = false;
            }
        }
        flushed
    }
}

impl Default for ModelInfoFactory {
    /// Default adapters, no cache.
    fn default() -> Self {
        Self::new(ProviderRegistry::default(), Arc::new(NullCache))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cache::InMemoryCache;
    use crate::http::HttpResponse;
    use crate::model::ModelType;
    use crate::providers::{CustomProvider, XaiProvider, XAI_BASE_URL};
    use crate::test_support::MockHttpClient;

    fn grok() -> String {
        json!({
            "id": "grok-2-1212",
            "input_modalities": ["text"],
            "prompt_text_token_price": 20000,
            "completion_text_token_price": 100000
        })
        .to_string()
    }

    fn xai_factory(client: Arc<MockHttpClient>, cache: InMemoryCache) -> ModelInfoFactory {
        let registry = ProviderRegistry::new(vec![Arc::new(XaiProvider::with_client(
            XAI_BASE_URL,
            "k",
            client,
        ))]);
        ModelInfoFactory::new(registry, Arc::new(cache)).with_namespace("test")
    }

    #[test]
    fn cache_keys() {
        let factory = ModelInfoFactory::with_adapters(vec![]).with_namespace("cortex");
        assert_eq!(factory.models_cache_key(ModelProvider::Ollama), "cortex.models.ollama");
        assert_eq!(
            factory.model_info_cache_key(ModelProvider::XAI, "grok-2"),
            "cortex.model-info.xai.grok-2"
        );
        assert_eq!(ModelInfoFactory::with_adapters(vec![]).namespace(), DEFAULT_CACHE_NAMESPACE);
    }

    /// **Scenario**: the second lookup is served from cache without an adapter call.
    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let client = Arc::new(MockHttpClient::new(vec![HttpResponse::ok(grok())]));
        let cache = InMemoryCache::new();
        let factory = xai_factory(client.clone(), cache.clone());

        let first = factory
            .get_model_info_or_fail(ModelProvider::XAI, "grok-2-1212")
            .await
            .unwrap();
        let second = factory
            .get_model_info_or_fail(ModelProvider::XAI, "grok-2-1212")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(client.calls(), 1);
        assert!(cache.has("test.model-info.xai.grok-2-1212").await);
    }

    #[tokio::test]
    async fn models_are_cached_as_names() {
        let body = json!({ "models": [serde_json::from_str::<serde_json::Value>(&grok()).unwrap()] });
        let client = Arc::new(MockHttpClient::new(vec![HttpResponse::ok(body.to_string())]));
        let cache = InMemoryCache::new();
        let factory = xai_factory(client.clone(), cache.clone());

        assert_eq!(factory.get_models(ModelProvider::XAI).await, vec!["grok-2-1212"]);
        assert_eq!(factory.get_models(ModelProvider::XAI).await, vec!["grok-2-1212"]);
        assert_eq!(client.calls(), 1);
        assert_eq!(cache.get("test.models.xai").await, Some(json!(["grok-2-1212"])));
    }

    /// **Scenario**: a cache hit never reaches the adapter, even for a provider it cannot serve.
    #[tokio::test]
    async fn hit_bypasses_adapters() {
        let cache = InMemoryCache::new();
        cache
            .set("model-info.models.groq", json!(["llama-3.3-70b"]), None)
            .await
            .unwrap();
        let factory = ModelInfoFactory::new(ProviderRegistry::new(vec![]), Arc::new(cache));

        assert_eq!(
            factory.get_models_or_fail(ModelProvider::Groq).await.unwrap(),
            vec!["llama-3.3-70b"]
        );
    }

    /// **Scenario**: failures are not cached; the next call after recovery succeeds.
    #[tokio::test]
    async fn failures_are_not_cached() {
        let client = Arc::new(MockHttpClient::new(vec![
            HttpResponse::status(503),
            HttpResponse::ok(grok()),
        ]));
        let cache = InMemoryCache::new();
        let factory = xai_factory(client.clone(), cache.clone());

        assert!(factory
            .get_model_info(ModelProvider::XAI, "grok-2-1212")
            .await
            .is_none());
        assert!(cache.is_empty().await);

        let info = factory
            .get_model_info(ModelProvider::XAI, "grok-2-1212")
            .await
            .unwrap();
        assert_eq!(info.model_type, ModelType::Chat);
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn safe_api_swallows_every_error() {
        let client = Arc::new(MockHttpClient::failing("connection refused"));
        let factory = xai_factory(client, InMemoryCache::new());

        assert!(factory.get_models(ModelProvider::XAI).await.is_empty());
        assert!(factory.get_models(ModelProvider::Custom).await.is_empty());
        assert!(factory.get_model_info(ModelProvider::XAI, "grok").await.is_none());

        let err = factory.get_models_or_fail(ModelProvider::XAI).await.unwrap_err();
        assert!(matches!(err, ModelInfoError::FetchFailed { .. }));
        let err = factory.get_models_or_fail(ModelProvider::Custom).await.unwrap_err();
        assert!(matches!(err, ModelInfoError::UnsupportedProvider(ModelProvider::Custom)));
    }

    #[tokio::test]
    async fn undecodable_entry_is_a_miss() {
        let cache = InMemoryCache::new();
        cache
            .set("model-info.model-info.custom.house", json!("garbage"), None)
            .await
            .unwrap();
        let adapter = CustomProvider::new(vec![ModelInfo::new("house", ModelProvider::Custom, ModelType::Chat)]);
        let factory =
            ModelInfoFactory::new(ProviderRegistry::new(vec![Arc::new(adapter)]), Arc::new(cache.clone()));

        let info = factory
            .get_model_info_or_fail(ModelProvider::Custom, "house")
            .await
            .unwrap();
        assert_eq!(info.name, "house");
        assert_eq!(
            cache.get("model-info.model-info.custom.house").await.unwrap()["name"],
            json!("house")
        );
    }

    #[tokio::test]
    async fn flush_removes_only_own_entries() {
        let cache = InMemoryCache::new();
        cache.set("test.models.xai", json!([]), None).await.unwrap();
        cache.set("test.model-info.xai.grok", json!({}), None).await.unwrap();
        cache.set("test.litellm.catalog", json!({}), None).await.unwrap();
        cache.set("other.models.xai", json!([]), None).await.unwrap();
        cache.set("other.litellm.catalog", json!({}), None).await.unwrap();
        let factory = xai_factory(Arc::new(MockHttpClient::new(vec![])), cache.clone());

        assert!(factory.flush_cache().await);

        assert!(!cache.has("test.models.xai").await);
        assert!(!cache.has("test.model-info.xai.grok").await);
        assert!(!cache.has("test.litellm.catalog").await);
        assert!(cache.has("other.models.xai").await);
        assert!(cache.has("other.litellm.catalog").await);
    }

    #[tokio::test]
    async fn ttl_applies_to_writes() {
        let adapter = CustomProvider::new(vec![ModelInfo::new("house", ModelProvider::Custom, ModelType::Chat)]);
        let cache = InMemoryCache::new();
        let factory = ModelInfoFactory::new(ProviderRegistry::new(vec![Arc::new(adapter)]), Arc::new(cache.clone()))
            .with_ttl(Some(Duration::from_millis(30)));

        factory.get_models(ModelProvider::Custom).await;
        assert!(cache.has("model-info.models.custom").await);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!cache.has("model-info.models.custom").await);
    }
}
