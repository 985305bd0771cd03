//! # model-info
//!
//! Look up LLM model metadata (type, context limits, per-token prices, capabilities)
//! from several catalogs through one normalized record, [`ModelInfo`].
//!
//! ## Design
//!
//! - **Adapters** ([`ModelInfoProvider`]) fetch one source's native catalog and map it into
//!   [`ModelInfo`]: [`OllamaProvider`] and [`LmStudioProvider`] (local runtimes),
//!   [`LiteLlmProvider`] (static price table for hosted providers), [`XaiProvider`] (xAI API)
//!   and [`CustomProvider`] (caller-supplied records).
//! - **Registry** ([`ProviderRegistry`]) holds adapters in priority order and hands each
//!   [`ModelProvider`] to the first adapter that supports it. Default: Ollama, then LiteLLM.
//! - **Factory** ([`ModelInfoFactory`]) puts a [`Cache`] in front of the registry and offers
//!   two conventions: `*_or_fail` methods return [`ModelInfoError`], the plain ones return
//!   an empty list or `None` instead.
//!
//! All I/O goes through two seams, [`HttpClient`] and [`Cache`], so tests and embedders can
//! swap the transport or the cache backend.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use model_info::{InMemoryCache, ModelInfoFactory, ModelProvider, ProviderRegistry};
//!
//! let factory = ModelInfoFactory::new(ProviderRegistry::default(), Arc::new(InMemoryCache::new()));
//! let models = factory.get_models(ModelProvider::OpenAI).await;
//! let cost = ModelProvider::OpenAI
//!     .input_cost_for_tokens(&factory, "gpt-4o", 10_000)
//!     .await;
//! ```
//!
//! ## Main modules
//!
//! - [`model`]: [`ModelInfo`], [`ModelProvider`], [`ModelType`], [`ModelFeature`].
//! - [`providers`]: [`ModelInfoProvider`] and the five adapters.
//! - [`registry`]: [`ProviderRegistry`].
//! - [`factory`]: [`ModelInfoFactory`].
//! - [`cache`]: [`Cache`], [`NullCache`], [`InMemoryCache`], [`JsonFileCache`].
//! - [`http`]: [`HttpClient`], [`ReqwestHttpClient`].
//! - [`settings`]: [`ModelInfoSettings`] from `MODEL_INFO_*` environment variables.

pub mod cache;
pub mod error;
pub mod factory;
pub mod http;
mod lookup;
pub mod model;
pub mod providers;
pub mod registry;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use cache::{Cache, CacheError, InMemoryCache, JsonFileCache, NullCache};
pub use error::ModelInfoError;
pub use factory::{ModelInfoFactory, DEFAULT_CACHE_NAMESPACE};
pub use http::{HttpClient, HttpRequest, HttpResponse, Method, ReqwestHttpClient};
pub use model::{ModelFeature, ModelInfo, ModelProvider, ModelType};
pub use providers::{
    CustomProvider, LiteLlmProvider, LmStudioProvider, ModelInfoProvider, OllamaProvider,
    XaiProvider,
};
pub use registry::ProviderRegistry;
pub use settings::ModelInfoSettings;
