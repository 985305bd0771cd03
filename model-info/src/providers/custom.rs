//! Caller-supplied records, served without any I/O.

use async_trait::async_trait;
use serde_json::Value;

use super::ModelInfoProvider;
use crate::error::ModelInfoError;
use crate::model::{ModelInfo, ModelProvider};

/// Serves a fixed list of [`ModelInfo`] records for any provider.
///
/// Not part of the default registry; pass it explicitly to add private or
/// self-hosted models, or to override what another adapter reports.
#[derive(Debug, Clone, Default)]
pub struct CustomProvider {
    models: Vec<ModelInfo>,
}

impl CustomProvider {
    pub fn new(models: Vec<ModelInfo>) -> Self {
        Self { models }
    }

    /// Normalizes raw records (see [`ModelInfo::from_value`]) up front.
    pub fn from_values(values: Vec<Value>) -> Result<Self, ModelInfoError> {
        let models = values
            .into_iter()
            .map(ModelInfo::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(models))
    }

    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }
}

#[async_trait]
impl ModelInfoProvider for CustomProvider {
    fn name(&self) -> &str {
        "custom"
    }

    fn supported_providers(&self) -> Vec<ModelProvider> {
        ModelProvider::all().to_vec()
    }

    async fn get_model_infos(&self, provider: ModelProvider) -> Result<Vec<ModelInfo>, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        Ok(self
            .models
            .iter()
            .filter(|info| info.provider == provider)
            .cloned()
            .collect())
    }

    async fn get_model_info(
        &self,
        provider: ModelProvider,
        model: &str,
    ) -> Result<ModelInfo, ModelInfoError> {
        self.check_support_or_fail(provider)?;
        self.models
            .iter()
            .find(|info| info.provider == provider && info.name == model)
            .cloned()
            .ok_or_else(|| ModelInfoError::model_not_found(provider, model))
    }
}
