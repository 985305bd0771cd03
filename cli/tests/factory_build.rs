//! The factory the binary builds, driven through a canned transport.

#[path = "../../model-info/tests/init_logging.rs"]
mod init_logging;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cli::{build_factory_with, ExtraAdapter};
use model_info::{
    Cache, HttpClient, HttpRequest, HttpResponse, InMemoryCache, ModelFeature, ModelInfoSettings,
    ModelProvider,
};
use serde_json::json;

const CATALOG_URL: &str = "http://catalog.test/prices.json";
const XAI_URL: &str = "http://xai.test/v1";

/// Answers known URLs and records every requested URL; anything else is a 404.
#[derive(Default)]
struct CannedClient {
    bodies: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl CannedClient {
    fn with(mut self, url: &str, body: serde_json::Value) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for CannedClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.requested.lock().unwrap().push(request.url.clone());
        Ok(match self.bodies.get(&request.url) {
            Some(body) => HttpResponse::ok(body.clone()),
            None => HttpResponse::status(404),
        })
    }
}

fn settings() -> ModelInfoSettings {
    ModelInfoSettings {
        litellm_url: CATALOG_URL.to_string(),
        xai_base_url: XAI_URL.to_string(),
        xai_api_key: Some("xai-test".to_string()),
        ..ModelInfoSettings::default()
    }
}

fn catalog() -> serde_json::Value {
    json!({
        "gpt-4o": {
            "litellm_provider": "openai",
            "mode": "chat",
            "input_cost_per_token": 0.0000025,
            "output_cost_per_token": 0.00001
        },
        "gpt-4o-mini": {
            "litellm_provider": "openai",
            "mode": "chat",
            "input_cost_per_token": 0.00000015,
            "output_cost_per_token": 0.0000006
        }
    })
}

/// **Scenario**: listing models and pricing two of them downloads the catalog once.
#[tokio::test]
async fn catalog_downloaded_once_per_process() {
    let client = Arc::new(CannedClient::default().with(CATALOG_URL, catalog()));
    let factory = build_factory_with(&settings(), Arc::new(InMemoryCache::new()), &[], client.clone());

    let models = cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    assert_eq!(models, vec!["gpt-4o", "gpt-4o-mini"]);

    let report = cli::cost(&factory, ModelProvider::OpenAI, "gpt-4o", 2_000, 1_000)
        .await
        .unwrap();
    assert!((report.total_cost - 0.015).abs() < 1e-12);
    let mini = cli::info(&factory, ModelProvider::OpenAI, "gpt-4o-mini", true)
        .await
        .unwrap();
    assert_eq!(mini.name, "gpt-4o-mini");

    assert_eq!(client.requested(), vec![CATALOG_URL.to_string()]);
}

/// **Scenario**: after `flush`, the next model list goes upstream exactly once more.
#[tokio::test]
async fn flush_forces_one_fresh_catalog_download() {
    let client = Arc::new(CannedClient::default().with(CATALOG_URL, catalog()));
    let factory = build_factory_with(&settings(), Arc::new(InMemoryCache::new()), &[], client.clone());

    let first = cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    let again = cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    assert_eq!(first, again);
    assert_eq!(client.requested().len(), 1);

    assert!(cli::flush(&factory).await);
    let after = cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    assert_eq!(after, first);
    assert_eq!(client.requested().len(), 2);

    cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    assert_eq!(client.requested().len(), 2);
}

/// **Scenario**: a persisted cache file does not keep serving the catalog after `flush`.
#[tokio::test]
async fn flush_clears_catalog_in_cache_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model-info.json");
    let client = Arc::new(CannedClient::default().with(CATALOG_URL, catalog()));

    let factory = build_factory_with(&settings(), cli::build_cache(Some(path.as_path())), &[], client.clone());
    cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    assert!(cli::flush(&factory).await);

    let reopened = build_factory_with(&settings(), cli::build_cache(Some(path.as_path())), &[], client.clone());
    cli::info(&reopened, ModelProvider::OpenAI, "gpt-4o", true).await.unwrap();
    assert_eq!(client.requested().len(), 2);
}

#[tokio::test]
async fn catalog_expires_with_cache_ttl() {
    let settings = ModelInfoSettings {
        cache_ttl: Some(Duration::from_millis(30)),
        ..settings()
    };
    let cache = InMemoryCache::new();
    let client = Arc::new(CannedClient::default().with(CATALOG_URL, catalog()));
    let factory = build_factory_with(&settings, Arc::new(cache.clone()), &[], client.clone());

    cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    assert!(cache.has("model-info.litellm.catalog").await);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(!cache.has("model-info.litellm.catalog").await);
    cli::models(&factory, ModelProvider::OpenAI, true).await.unwrap();
    assert_eq!(client.requested().len(), 2);
}

#[tokio::test]
async fn with_xai_queries_xai_api() {
    let client = Arc::new(CannedClient::default().with(
        &format!("{}/language-models/grok-2-vision-1212", XAI_URL),
        json!({
            "id": "grok-2-vision-1212",
            "input_modalities": ["text", "image"],
            "prompt_text_token_price": 20000,
            "completion_text_token_price": 100000
        }),
    ));
    let factory = build_factory_with(
        &settings(),
        Arc::new(InMemoryCache::new()),
        &[ExtraAdapter::Xai],
        client.clone(),
    );

    let info = cli::info(&factory, ModelProvider::XAI, "grok-2-vision-1212", true)
        .await
        .unwrap();
    assert!(info.supports_feature(ModelFeature::Vision));
    assert_eq!(info.max_input_tokens, Some(32_768));
    assert!(client.requested().iter().all(|u| u.starts_with(XAI_URL)));
}

#[tokio::test]
async fn catalog_outage_is_unavailable_unless_strict() {
    let client = Arc::new(CannedClient::default());
    let factory = build_factory_with(&settings(), Arc::new(InMemoryCache::new()), &[], client);

    let err = cli::info(&factory, ModelProvider::OpenAI, "gpt-4o", false)
        .await
        .unwrap_err();
    assert!(matches!(err, cli::CliError::Unavailable { .. }));

    let err = cli::info(&factory, ModelProvider::OpenAI, "gpt-4o", true)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("status 404"), "{}", err);
}
