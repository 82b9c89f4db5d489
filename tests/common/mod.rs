//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use staykit::auth::{AuthService, User};
use staykit::config::AuthConfig;
use staykit::remote::{ApiRequest, Method, Transport};
use staykit::state::{FailureInfo, FailureKind};

/// Transport that replays queued responses and records every request.
///
/// An empty queue answers with a network failure so a missing script
/// shows up as an error state instead of a hang.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, FailureInfo>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, body: Value) -> &Self {
        self.responses.lock().push_back(Ok(body));
        self
    }

    pub fn fail(&self, status: u16, message: &str) -> &Self {
        self.responses
            .lock()
            .push_back(Err(FailureInfo::from_status(status, message)));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, FailureInfo> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FailureInfo::new(FailureKind::Network, "no scripted response")))
    }
}

/// Upcast for service constructors.
pub fn transport(mock: &Arc<MockTransport>) -> Arc<dyn Transport> {
    Arc::clone(mock) as Arc<dyn Transport>
}

pub fn user_json(email: &str, authorities: &[&str]) -> Value {
    json!({
        "email": email,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "imageUrl": null,
        "authorities": authorities,
    })
}

/// Auth service whose store already holds a signed-in user.
pub async fn signed_in_auth(mock: &Arc<MockTransport>) -> AuthService {
    let auth = AuthService::new(transport(mock), &AuthConfig::default());
    mock.respond(user_json("ada@example.com", &["ROLE_TENANT"]));
    auth.fetch(false).await;
    auth
}
