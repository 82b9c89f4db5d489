//! Detects a session that expired while a user was signed in.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::auth::predicate::AuthPredicate;
use crate::auth::service::AuthService;
use crate::remote::{ApiRequest, Transport};
use crate::state::FailureInfo;

/// Paths under this prefix belong to the auth endpoints themselves.
const AUTH_PATH_PREFIX: &str = "/auth/";

/// A 401 hit a signed-in user; the login flow has to start again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequired {
    /// Where to send the user.
    pub login_url: String,
    /// Path of the request that was rejected.
    pub path: String,
}

/// [`Transport`] wrapper that reports expired sessions.
///
/// Responses pass through untouched: the 401 still reaches the operation and
/// is stored as an error. In addition, when the rejected path is outside
/// `/auth/` and the user store still holds a signed-in user, a
/// [`LoginRequired`] is sent on the channel returned by [`new`](Self::new).
pub struct AuthExpiredTransport {
    inner: Arc<dyn Transport>,
    auth: Arc<dyn AuthPredicate>,
    login_url: String,
    tx: mpsc::UnboundedSender<LoginRequired>,
}

impl AuthExpiredTransport {
    pub fn new(
        inner: Arc<dyn Transport>,
        auth: &AuthService,
    ) -> (Self, mpsc::UnboundedReceiver<LoginRequired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = Self {
            inner,
            auth: Arc::new(auth.fetch_user_state().clone()),
            login_url: auth.login_url().to_string(),
            tx,
        };
        (transport, rx)
    }
}

#[async_trait]
impl Transport for AuthExpiredTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, FailureInfo> {
        let path = request.path.clone();
        let result = self.inner.execute(request).await;

        if let Err(failure) = &result {
            if failure.is_unauthorized()
                && !path.starts_with(AUTH_PATH_PREFIX)
                && self.auth.is_authenticated()
            {
                tracing::info!(path = %path, "session expired, login required");
                // Nobody listening means nobody to redirect.
                let _ = self.tx.send(LoginRequired {
                    login_url: self.login_url.clone(),
                    path,
                });
            }
        }
        result
    }
}
