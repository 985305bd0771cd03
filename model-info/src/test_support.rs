//! Test-only helpers shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::http::{HttpClient, HttpRequest, HttpResponse};

/// Replays queued responses in order and records every request it receives.
pub(crate) struct MockHttpClient {
    responses: Mutex<VecDeque<HttpResponse>>,
    fail_with: Option<String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub(crate) fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fail_with: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails at the transport level.
    pub(crate) fn failing(reason: &str) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fail_with: Some(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push(request);
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone());
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| "no more mock responses".to_string())
    }
}
