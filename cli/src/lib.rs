//! Library side of the `model-info` binary: builds a [`ModelInfoFactory`] from
//! [`ModelInfoSettings`] and runs the subcommands. `main.rs` only parses arguments,
//! sets up logging and prints.

mod commands;
mod output;

use std::path::Path;
use std::sync::Arc;

use model_info::{
    Cache, HttpClient, InMemoryCache, JsonFileCache, LiteLlmProvider, LmStudioProvider,
    ModelInfoError, ModelInfoFactory, ModelInfoProvider, ModelInfoSettings, ModelProvider,
    OllamaProvider, ProviderRegistry, ReqwestHttpClient, XaiProvider,
};
use thiserror::Error;

pub use commands::{cost, flush, info, models, providers, CostReport, ProviderRow};
pub use output::{render_cost, render_info, render_models, render_providers, write_json_output};

/// Adapters that are off by default and enabled with `--with`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtraAdapter {
    /// LM Studio's local REST API
    Lmstudio,
    /// xAI language-models API (needs `XAI_API_KEY`)
    Xai,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Lookup(#[from] ModelInfoError),
    /// Safe lookup came back empty; `--strict` shows why.
    #[error("no model info for {provider}/{model} (use --strict to see the error)")]
    Unavailable { provider: ModelProvider, model: String },
    #[error("encode output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Extra adapters (in `--with` order, duplicates dropped) ahead of Ollama and LiteLLM.
///
/// The LiteLLM document is kept in `catalog_cache` under the settings' namespace and
/// `cache_ttl`, so it expires with the lookups and is dropped by `flush`.
pub fn build_registry(
    settings: &ModelInfoSettings,
    extras: &[ExtraAdapter],
    http_client: Arc<dyn HttpClient>,
    catalog_cache: Arc<dyn Cache>,
) -> ProviderRegistry {
    let mut adapters: Vec<Arc<dyn ModelInfoProvider>> = Vec::new();
    let mut seen = Vec::new();
    for extra in extras {
        if seen.contains(extra) {
            continue;
        }
        seen.push(*extra);
        match extra {
            ExtraAdapter::Lmstudio => adapters.push(Arc::new(LmStudioProvider::with_client(
                settings.lmstudio_host.as_str(),
                http_client.clone(),
            ))),
            ExtraAdapter::Xai => match &settings.xai_api_key {
                Some(key) => adapters.push(Arc::new(XaiProvider::with_client(
                    settings.xai_base_url.as_str(),
                    key.as_str(),
                    http_client.clone(),
                ))),
                None => tracing::warn!("XAI_API_KEY is not set; xai adapter not registered"),
            },
        }
    }
    adapters.push(Arc::new(OllamaProvider::with_client(
        settings.ollama_host.as_str(),
        http_client.clone(),
    )));
    adapters.push(Arc::new(
        LiteLlmProvider::with_client(settings.litellm_url.as_str(), http_client).with_cache(
            catalog_cache,
            &settings.cache_namespace,
            settings.cache_ttl,
        ),
    ));
    ProviderRegistry::new(adapters)
}

/// File-backed cache when `cache_file` is given, else a cache for this process only.
pub fn build_cache(cache_file: Option<&Path>) -> Arc<dyn Cache> {
    match cache_file {
        Some(path) => Arc::new(JsonFileCache::new(path)),
        None => Arc::new(InMemoryCache::new()),
    }
}

/// Factory over [`build_registry`] with the reqwest transport.
pub fn build_factory(
    settings: &ModelInfoSettings,
    cache_file: Option<&Path>,
    extras: &[ExtraAdapter],
) -> ModelInfoFactory {
    build_factory_with(settings, build_cache(cache_file), extras, Arc::new(ReqwestHttpClient::new()))
}

pub fn build_factory_with(
    settings: &ModelInfoSettings,
    cache: Arc<dyn Cache>,
    extras: &[ExtraAdapter],
    http_client: Arc<dyn HttpClient>,
) -> ModelInfoFactory {
    let registry = build_registry(settings, extras, http_client, cache.clone());
    ModelInfoFactory::new(registry, cache)
        .with_namespace(settings.cache_namespace.as_str())
        .with_ttl(settings.cache_ttl)
}
