//! Remote calls and their bridge into state stores.
//!
//! A service builds one [`Endpoint`] per API route on top of a shared
//! [`Transport`], wraps it in a [`RemoteOperation`] together with the store
//! it owns, and runs the operation whenever the UI asks for it.

mod call;
mod http;
mod operation;
mod transport;

pub use call::{Endpoint, RemoteCall};
pub use http::HttpTransport;
pub use operation::RemoteOperation;
pub use transport::{ApiRequest, Method, Transport};
