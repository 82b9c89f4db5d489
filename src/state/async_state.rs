//! Tri-state value describing the lifecycle of one remote operation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle phase of an [`AsyncState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Init,
    Ok,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Init => write!(f, "INIT"),
            Status::Ok => write!(f, "OK"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

/// Classification of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404.
    NotFound,
    /// Any other 4xx.
    Client,
    /// 5xx.
    Server,
    /// The request never got a response (DNS, refused connection, reset).
    Network,
    /// The request exceeded its deadline.
    Timeout,
    /// The request could not be encoded or the response could not be decoded.
    Decode,
}

impl FailureKind {
    /// Classify an HTTP status code.
    ///
    /// Codes outside 4xx/5xx are treated as server faults since a caller
    /// only asks when the exchange did not succeed.
    pub fn from_status(code: u16) -> Self {
        match code {
            401 => FailureKind::Unauthorized,
            403 => FailureKind::Forbidden,
            404 => FailureKind::NotFound,
            400..=499 => FailureKind::Client,
            _ => FailureKind::Server,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::Forbidden => "forbidden",
            FailureKind::NotFound => "not-found",
            FailureKind::Client => "client-error",
            FailureKind::Server => "server-error",
            FailureKind::Network => "network-error",
            FailureKind::Timeout => "timeout",
            FailureKind::Decode => "decode-error",
        };
        f.write_str(label)
    }
}

/// Failure descriptor carried by [`AsyncState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FailureInfo {
    pub kind: FailureKind,
    /// HTTP status code, when the failure came from a response.
    pub status: Option<u16>,
    pub message: String,
}

impl FailureInfo {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// Failure built from a non-successful HTTP response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::from_status(status),
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn decode(err: impl fmt::Display) -> Self {
        Self::new(FailureKind::Decode, err.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }
}

/// Immutable snapshot of a remote operation's result.
///
/// The variant carries the payload, so a value exists only for `Ok` and an
/// error only for `Error`. Every transition builds a new instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AsyncState<T> {
    #[default]
    Init,
    Ok(T),
    Error(FailureInfo),
}

impl<T> AsyncState<T> {
    pub fn for_init() -> Self {
        AsyncState::Init
    }

    pub fn for_success(value: T) -> Self {
        AsyncState::Ok(value)
    }

    pub fn for_error(error: FailureInfo) -> Self {
        AsyncState::Error(error)
    }

    pub fn status(&self) -> Status {
        match self {
            AsyncState::Init => Status::Init,
            AsyncState::Ok(_) => Status::Ok,
            AsyncState::Error(_) => Status::Error,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            AsyncState::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FailureInfo> {
        match self {
            AsyncState::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            AsyncState::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_init(&self) -> bool {
        matches!(self, AsyncState::Init)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AsyncState::Ok(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AsyncState::Error(_))
    }

    /// Transform the payload, keeping the phase.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncState<U> {
        match self {
            AsyncState::Init => AsyncState::Init,
            AsyncState::Ok(value) => AsyncState::Ok(f(value)),
            AsyncState::Error(error) => AsyncState::Error(error),
        }
    }
}

impl<T> From<Result<T, FailureInfo>> for AsyncState<T> {
    fn from(result: Result<T, FailureInfo>) -> Self {
        match result {
            Ok(value) => AsyncState::for_success(value),
            Err(error) => AsyncState::for_error(error),
        }
    }
}
