//! The asynchronous capability a [`RemoteOperation`](super::RemoteOperation) bridges.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::remote::transport::{ApiRequest, Transport};
use crate::state::FailureInfo;

/// An external call that eventually yields `T` or fails.
#[async_trait]
pub trait RemoteCall<P, T>: Send + Sync {
    async fn invoke(&self, params: P) -> Result<T, FailureInfo>;
}

type RequestBuilder<P> = Box<dyn Fn(P) -> Result<ApiRequest, FailureInfo> + Send + Sync>;

/// [`RemoteCall`] that maps its parameters to an [`ApiRequest`] and decodes
/// the JSON response into `T`.
pub struct Endpoint<P, T> {
    transport: Arc<dyn Transport>,
    build: RequestBuilder<P>,
    _response: PhantomData<fn() -> T>,
}

impl<P, T> Endpoint<P, T> {
    pub fn new<F>(transport: Arc<dyn Transport>, build: F) -> Self
    where
        F: Fn(P) -> Result<ApiRequest, FailureInfo> + Send + Sync + 'static,
    {
        Self {
            transport,
            build: Box::new(build),
            _response: PhantomData,
        }
    }
}

#[async_trait]
impl<P, T> RemoteCall<P, T> for Endpoint<P, T>
where
    P: Send + 'static,
    T: DeserializeOwned + Send + 'static,
{
    async fn invoke(&self, params: P) -> Result<T, FailureInfo> {
        let request = (self.build)(params)?;
        let body = self.transport.execute(request).await?;
        serde_json::from_value(body).map_err(FailureInfo::decode)
    }
}
