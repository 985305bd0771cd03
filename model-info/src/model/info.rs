//! Canonical model record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kind::{ModelFeature, ModelType};
use super::provider::ModelProvider;
use crate::error::ModelInfoError;

/// Normalized, provider-agnostic description of one model.
///
/// Every adapter maps its native payload into this shape. `name` is the bare,
/// provider-scoped identifier (no `provider/` prefix). The serialized form uses
/// snake_case field names and is what the factory stores in its cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub provider: ModelProvider,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    /// `None` means unknown, not zero.
    #[serde(default)]
    pub max_input_tokens: Option<u64>,
    #[serde(default)]
    pub max_output_tokens: Option<u64>,
    /// USD per single input token. 0.0 when the provider publishes no price.
    #[serde(default)]
    pub input_cost_per_token: f64,
    /// USD per single output token.
    #[serde(default)]
    pub output_cost_per_token: f64,
    #[serde(default)]
    pub features: BTreeSet<ModelFeature>,
    #[serde(default)]
    pub is_deprecated: bool,
    /// Provider-specific extras.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl ModelInfo {
    /// Create a record with no limits, zero cost and no features.
    pub fn new(name: impl Into<String>, provider: ModelProvider, model_type: ModelType) -> Self {
        Self {
            name: name.into(),
            provider,
            model_type,
            max_input_tokens: None,
            max_output_tokens: None,
            input_cost_per_token: 0.0,
            output_cost_per_token: 0.0,
            features: BTreeSet::new(),
            is_deprecated: false,
            metadata: BTreeMap::new(),
        }
    }

    /// Build a record from its raw mapping form.
    ///
    /// Absent optional fields take their defaults; unknown provider, type or
    /// feature strings fail with [`ModelInfoError::DecodeFailed`].
    pub fn from_value(value: Value) -> Result<Self, ModelInfoError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_max_input_tokens(mut self, tokens: Option<u64>) -> Self {
        self.max_input_tokens = tokens;
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: Option<u64>) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    /// Set input and output USD cost per token.
    pub fn with_costs(mut self, input_per_token: f64, output_per_token: f64) -> Self {
        self.input_cost_per_token = input_per_token;
        self.output_cost_per_token = output_per_token;
        self
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = ModelFeature>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.is_deprecated = deprecated;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn supports_feature(&self, feature: ModelFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Cost in USD of `tokens` input tokens.
    pub fn input_cost_for_tokens(&self, tokens: u64) -> f64 {
        self.input_cost_per_token * tokens as f64
    }

    /// Cost in USD of `tokens` output tokens.
    pub fn output_cost_for_tokens(&self, tokens: u64) -> f64 {
        self.output_cost_per_token * tokens as f64
    }
}
