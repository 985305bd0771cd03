//! Per-provider shortcuts: `ModelProvider::XAI.info(&factory, "grok-2")`.

use std::sync::Arc;

use crate::factory::ModelInfoFactory;
use crate::model::{ModelInfo, ModelProvider};
use crate::providers::ModelInfoProvider;

impl ModelProvider {
    /// Model names of this provider through `factory`; empty on any failure.
    pub async fn models(self, factory: &ModelInfoFactory) -> Vec<String> {
        factory.get_models(self).await
    }

    /// Like [`Self::models`], with a one-off uncached factory over `adapters`.
    pub async fn models_with(self, adapters: Vec<Arc<dyn ModelInfoProvider>>) -> Vec<String> {
        ModelInfoFactory::with_adapters(adapters).get_models(self).await
    }

    pub async fn info(self, factory: &ModelInfoFactory, model: &str) -> Option<ModelInfo> {
        factory.get_model_info(self, model).await
    }

    /// Like [`Self::info`], with a one-off uncached factory over `adapters`.
    pub async fn info_with(
        self,
        adapters: Vec<Arc<dyn ModelInfoProvider>>,
        model: &str,
    ) -> Option<ModelInfo> {
        ModelInfoFactory::with_adapters(adapters)
            .get_model_info(self, model)
            .await
    }

    /// USD for `tokens` input tokens; `None` when the model cannot be looked up.
    pub async fn input_cost_for_tokens(
        self,
        factory: &ModelInfoFactory,
        model: &str,
        tokens: u64,
    ) -> Option<f64> {
        self.info(factory, model)
            .await
            .map(|info| info.input_cost_for_tokens(tokens))
    }

    /// USD for `tokens` output tokens; `None` when the model cannot be looked up.
    pub async fn output_cost_for_tokens(
        self,
        factory: &ModelInfoFactory,
        model: &str,
        tokens: u64,
    ) -> Option<f64> {
        self.info(factory, model)
            .await
            .map(|info| info.output_cost_for_tokens(tokens))
    }
}
