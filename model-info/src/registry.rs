//! Provider registry: picks the adapter that serves a provider.

use std::sync::Arc;

use crate::error::ModelInfoError;
use crate::model::{ModelInfo, ModelProvider};
use crate::providers::{LiteLlmProvider, ModelInfoProvider, OllamaProvider};

/// Ordered list of adapters. The first adapter whose `supports` is true handles
/// the call; results from different adapters are never merged and a later adapter
/// is not tried when the first one fails.
pub struct ProviderRegistry {
    adapters: Vec<Arc<dyn ModelInfoProvider>>,
}

impl ProviderRegistry {
    /// Create with the given adapters, in priority order.
    pub fn new(adapters: Vec<Arc<dyn ModelInfoProvider>>) -> Self {
        Self { adapters }
    }

    /// Local Ollama first, then the LiteLLM catalog for everything else.
    pub fn default_adapters() -> Vec<Arc<dyn ModelInfoProvider>> {
        vec![
            Arc::new(OllamaProvider::new()),
            Arc::new(LiteLlmProvider::new()),
        ]
    }

    /// Add an adapter at the end of the chain.
    pub fn push(&mut self, adapter: Arc<dyn ModelInfoProvider>) {
        self.adapters.push(adapter);
    }

    /// Add an adapter ahead of every existing one.
    pub fn prepend(&mut self, adapter: Arc<dyn ModelInfoProvider>) {
        self.adapters.insert(0, adapter);
    }

    pub fn adapters(&self) -> &[Arc<dyn ModelInfoProvider>] {
        &self.adapters
    }

    /// The adapter that handles `provider`, if any.
    pub fn adapter_for(&self, provider: ModelProvider) -> Option<&Arc<dyn ModelInfoProvider>> {
        self.adapters.iter().find(|adapter| adapter.supports(provider))
    }

    fn adapter_or_fail(&self, provider: ModelProvider) -> Result<&Arc<dyn ModelInfoProvider>, ModelInfoError> {
        let adapter = self
            .adapter_for(provider)
            .ok_or(ModelInfoError::UnsupportedProvider(provider))?;
        tracing::debug!(provider = %provider, adapter = adapter.name(), "dispatching model info lookup");
        Ok(adapter)
    }

    pub async fn models_or_fail(&self, provider: ModelProvider) -> Result<Vec<String>, ModelInfoError> {
        self.adapter_or_fail(provider)?.get_models(provider).await
    }

    /// Like [`Self::models_or_fail`], but a provider no adapter serves yields an empty list.
    pub async fn models(&self, provider: ModelProvider) -> Result<Vec<String>, ModelInfoError> {
        match self.models_or_fail(provider).await {
            Err(ModelInfoError::UnsupportedProvider(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    pub async fn model_info_or_fail(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError> {
        self.adapter_or_fail(provider)?
            .get_model_info(provider, model)
            .await
    }

    /// Like [`Self::model_info_or_fail`], but a provider no adapter serves yields `None`.
    pub async fn model_info(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<Option<ModelInfo>, ModelInfoError> {
        match self.model_info_or_fail(provider, model).await {
            Ok(info) => Ok(Some(info)),
            Err(ModelInfoError::UnsupportedProvider(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(Self::default_adapters())
    }
}
