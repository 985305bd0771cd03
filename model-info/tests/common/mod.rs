//! Shared helpers for integration tests: an [`HttpClient`] that answers by URL.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use model_info::{HttpClient, HttpRequest, HttpResponse};

/// Serves canned bodies keyed by URL; unknown URLs get a 404.
#[derive(Default)]
pub struct RoutedHttpClient {
    routes: Mutex<HashMap<String, HttpResponse>>,
    calls: AtomicUsize,
}

impl RoutedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: &str, body: serde_json::Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), HttpResponse::ok(body.to_string()));
        self
    }

    pub fn set_status(&self, url: &str, status: u16) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), HttpResponse::status(status));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for RoutedHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let routes = self.routes.lock().unwrap();
        Ok(routes
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::status(404)))
    }
}
