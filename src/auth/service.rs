//! Current-user session: fetch, logout, authority checks.

use std::sync::Arc;

use serde::Deserialize;

use crate::auth::user::{SessionState, User};
use crate::auth::AuthPredicate;
use crate::config::AuthConfig;
use crate::remote::{ApiRequest, Endpoint, RemoteOperation, Transport};
use crate::state::{AsyncState, FailureInfo, StateStore, Status};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogoutResponse {
    logout_url: String,
}

/// Owns the "fetch current user" store.
///
/// The store starts at the logged-out sentinel rather than INIT, so
/// consumers can treat "never fetched" as anonymous.
pub struct AuthService {
    transport: Arc<dyn Transport>,
    fetch_user: RemoteOperation<bool, User>,
    login_url: String,
}

impl AuthService {
    pub fn new(transport: Arc<dyn Transport>, config: &AuthConfig) -> Self {
        let store = StateStore::with_initial(AsyncState::for_success(User::not_connected()));
        let endpoint: Endpoint<bool, User> =
            Endpoint::new(Arc::clone(&transport), |force_resync: bool| {
                Ok(ApiRequest::get("/auth/get-authenticated-user").query("forceResync", force_resync))
            });
        let fetch_user = RemoteOperation::new("fetch-user", Arc::new(endpoint), store.clone())
            .with_session_expiry(Arc::new(store), User::not_connected());

        Self {
            transport,
            fetch_user,
            login_url: config.login_url(),
        }
    }

    /// Fetch the authenticated user.
    ///
    /// A 401 while a user is held falls back to the logged-out sentinel.
    pub async fn fetch(&self, force_resync: bool) -> Status {
        self.fetch_user.run(force_resync).await
    }

    pub fn fetch_user_state(&self) -> &StateStore<User> {
        self.fetch_user.store()
    }

    /// End the session and return the identity provider's logout URL.
    ///
    /// The store only changes on success.
    pub async fn logout(&self) -> Result<String, FailureInfo> {
        let body = self
            .transport
            .execute(ApiRequest::post("/auth/logout").json(&serde_json::json!({}))?)
            .await?;
        let response: LogoutResponse = serde_json::from_value(body).map_err(FailureInfo::decode)?;

        self.fetch_user
            .store()
            .set(AsyncState::for_success(User::not_connected()));
        tracing::info!("logged out");
        Ok(response.logout_url)
    }

    /// URL that starts the OAuth2 login flow.
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        self.fetch_user
            .store()
            .read()
            .value()
            .is_some_and(|user| user.has_any_authority(authorities))
    }

    pub fn session(&self) -> SessionState {
        SessionState::from(self.fetch_user.store().read())
    }
}

impl AuthPredicate for AuthService {
    fn is_authenticated(&self) -> bool {
        self.fetch_user.store().is_authenticated()
    }
}
