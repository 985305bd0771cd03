//! Provider adapters: fetch a provider's native catalog and normalize it into [`ModelInfo`].
//!
//! Each adapter declares the [`ModelProvider`] values it can serve; the registry
//! asks the first adapter that supports a provider and never merges results.

mod custom;
mod litellm;
mod lmstudio;
mod ollama;
mod xai;

pub use custom::CustomProvider;
pub(crate) use litellm::CATALOG_CACHE_SEGMENT;
pub use litellm::{LiteLlmProvider, LITELLM_CATALOG_URL};
pub use lmstudio::{LmStudioProvider, DEFAULT_LMSTUDIO_HOST};
pub use ollama::{OllamaProvider, DEFAULT_OLLAMA_HOST};
pub use xai::{XaiProvider, XAI_BASE_URL};

use async_trait::async_trait;

use crate::error::ModelInfoError;
use crate::model::{ModelInfo, ModelProvider};

/// Converts a power-of-1024 context window into a conservative token budget (1000/1024).
pub(crate) const CONTEXT_LENGTH_SCALE: f64 = 0.9765625;

/// Scale a raw context length reported by a local runtime, truncating toward zero.
pub(crate) fn scale_context_length(raw: f64) -> Option<u64> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    Some((raw * CONTEXT_LENGTH_SCALE) as u64)
}

/// A data source that maps one or more providers' catalogs into [`ModelInfo`] records.
#[async_trait]
pub trait ModelInfoProvider: Send + Sync {
    /// Short adapter name used in logs (e.g. `"ollama"`).
    fn name(&self) -> &str;

    /// Providers this adapter can serve.
    fn supported_providers(&self) -> Vec<ModelProvider>;

    fn supports(&self, provider: ModelProvider) -> bool {
        self.supported_providers().contains(&provider)
    }

    /// Fails with [`ModelInfoError::UnsupportedProvider`] when `supports` is false.
    fn check_support_or_fail(&self, provider: ModelProvider) -> Result<(), ModelInfoError> {
        if self.supports(provider) {
            Ok(())
        } else {
            Err(ModelInfoError::UnsupportedProvider(provider))
        }
    }

    /// Every model of `provider`, normalized, in the order the source reports them.
    async fn get_model_infos(&self, provider: ModelProvider) -> Result<Vec<ModelInfo>, ModelInfoError>;

    /// Bare model names of `provider` in source order (no dedup, no sort).
    async fn get_models(&self, provider: ModelProvider) -> Result<Vec<String>, ModelInfoError> {
        Ok(self
            .get_model_infos(provider)
            .await?
            .into_iter()
            .map(|info| info.name)
            .collect())
    }

    /// One model of `provider` by exact name.
    async fn get_model_info(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError>;
}
