//! Bridges one [`RemoteCall`] into a [`StateStore`] update.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::auth::AuthPredicate;
use crate::remote::call::{Endpoint, RemoteCall};
use crate::remote::transport::{ApiRequest, Transport};
use crate::state::{AsyncState, FailureInfo, StateStore, Status};

/// Unauthorized-while-authenticated is stored as this success value.
struct SessionExpiry<T> {
    auth: Arc<dyn AuthPredicate>,
    sentinel: T,
}

/// Runs a remote call and records its outcome in the owned store.
///
/// Nothing is written when the call starts; exactly one `set` happens when
/// it resolves. A superseded invocation still writes when it resolves.
pub struct RemoteOperation<P, T> {
    name: &'static str,
    call: Arc<dyn RemoteCall<P, T>>,
    store: StateStore<T>,
    session_expiry: Option<SessionExpiry<T>>,
}

impl<P, T> RemoteOperation<P, T>
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, call: Arc<dyn RemoteCall<P, T>>, store: StateStore<T>) -> Self {
        Self {
            name,
            call,
            store,
            session_expiry: None,
        }
    }

    /// Translate an unauthorized failure into `for_success(sentinel)` when
    /// `auth` reports an authenticated caller at the time of the failure.
    pub fn with_session_expiry(mut self, auth: Arc<dyn AuthPredicate>, sentinel: T) -> Self {
        self.session_expiry = Some(SessionExpiry { auth, sentinel });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn store(&self) -> &StateStore<T> {
        &self.store
    }

    /// Invoke the call and store its outcome; returns the stored phase.
    pub async fn run(&self, params: P) -> Status {
        let next = match self.call.invoke(params).await {
            Ok(value) => {
                tracing::debug!(operation = self.name, "remote operation succeeded");
                AsyncState::for_success(value)
            }
            Err(failure) => self.on_failure(failure),
        };
        let status = next.status();
        self.store.set(next);
        status
    }

    fn on_failure(&self, failure: FailureInfo) -> AsyncState<T> {
        if failure.is_unauthorized() {
            if let Some(expiry) = &self.session_expiry {
                if expiry.auth.is_authenticated() {
                    tracing::info!(
                        operation = self.name,
                        "session expired, falling back to anonymous"
                    );
                    return AsyncState::for_success(expiry.sentinel.clone());
                }
            }
        }

        tracing::warn!(
            operation = self.name,
            kind = %failure.kind,
            status = ?failure.status,
            message = %failure.message,
            "remote operation failed"
        );
        AsyncState::for_error(failure)
    }
}

impl<P, T> RemoteOperation<P, T>
where
    P: Send + 'static,
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Operation over an [`Endpoint`] on `transport`, with a fresh store.
    pub fn from_endpoint<F>(name: &'static str, transport: &Arc<dyn Transport>, build: F) -> Self
    where
        F: Fn(P) -> Result<ApiRequest, FailureInfo> + Send + Sync + 'static,
    {
        let endpoint: Endpoint<P, T> = Endpoint::new(Arc::clone(transport), build);
        Self::new(name, Arc::new(endpoint), StateStore::new())
    }
}
