//! Model info lookup errors.
//!
//! Every adapter, the registry and the failing half of the factory API return
//! [`ModelInfoError`]. The safe half of the factory API swallows it.

use thiserror::Error;

use crate::model::ModelProvider;

/// Error returned by lookups through an adapter, the registry or the factory.
#[derive(Debug, Error)]
pub enum ModelInfoError {
    /// No adapter (or not this adapter) can serve the provider.
    #[error("model provider not supported: {0}")]
    UnsupportedProvider(ModelProvider),

    /// The provider's catalog has no model with this name.
    #[error("model not found: {provider}/{model}")]
    ModelNotFound {
        provider: ModelProvider,
        model: String,
    },

    /// The upstream request failed or returned a non-200 status.
    #[error("failed to get model info from {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The response body (or a raw record) could not be decoded.
    #[error("failed to decode model info: {0}")]
    DecodeFailed(String),
}

impl ModelInfoError {
    pub(crate) fn model_not_found(provider: ModelProvider, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider,
            model: model.into(),
        }
    }
}

impl From<serde_json::Error> for ModelInfoError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeFailed(err.to_string())
    }
}
