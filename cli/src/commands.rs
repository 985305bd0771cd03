//! Subcommand runners. Each takes the factory and returns data; printing lives in `output`.

use model_info::{ModelInfo, ModelInfoFactory, ModelProvider};
use serde::Serialize;

use crate::CliError;

/// Which adapter answers for a provider, `None` when nothing is registered for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRow {
    pub provider: ModelProvider,
    pub adapter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub provider: ModelProvider,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

pub fn providers(factory: &ModelInfoFactory) -> Vec<ProviderRow> {
    ModelProvider::all()
        .iter()
        .map(|&provider| ProviderRow {
            provider,
            adapter: factory
                .registry()
                .adapter_for(provider)
                .map(|a| a.name().to_string()),
        })
        .collect()
}

/// `strict` surfaces the lookup error; otherwise failures print as an empty list.
pub async fn models(
    factory: &ModelInfoFactory,
    provider: ModelProvider,
    strict: bool,
) -> Result<Vec<String>, CliError> {
    if strict {
        Ok(factory.get_models_or_fail(provider).await?)
    } else {
        Ok(factory.get_models(provider).await)
    }
}

pub async fn info(
    factory: &ModelInfoFactory,
    provider: ModelProvider,
    model: &str,
    strict: bool,
) -> Result<ModelInfo, CliError> {
    if strict {
        return Ok(factory.get_model_info_or_fail(provider, model).await?);
    }
    factory
        .get_model_info(provider, model)
        .await
        .ok_or_else(|| CliError::Unavailable {
            provider,
            model: model.to_string(),
        })
}

pub async fn cost(
    factory: &ModelInfoFactory,
    provider: ModelProvider,
    model: &str,
    input_tokens: u64,
    output_tokens: u64,
) -> Result<CostReport, CliError> {
    let unavailable = || CliError::Unavailable {
        provider,
        model: model.to_string(),
    };
    let input_cost = provider
        .input_cost_for_tokens(factory, model, input_tokens)
        .await
        .ok_or_else(unavailable)?;
    // Second lookup is served from the factory cache.
    let output_cost = provider
        .output_cost_for_tokens(factory, model, output_tokens)
        .await
        .ok_or_else(unavailable)?;
    Ok(CostReport {
        provider,
        model: model.to_string(),
        input_tokens,
        output_tokens,
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
    })
}

pub async fn flush(factory: &ModelInfoFactory) -> bool {
    factory.flush_cache().await
}
