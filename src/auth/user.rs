use serde::{Deserialize, Serialize};

use crate::auth::AuthPredicate;
use crate::state::{AsyncState, FailureInfo, StateStore};

/// Email placeholder carried by the logged-out sentinel user.
pub const NOT_CONNECTED: &str = "NOT_CONNECTED";

/// Authenticated user as returned by `/auth/get-authenticated-user`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl User {
    /// The sentinel standing for "no authenticated user".
    pub fn not_connected() -> Self {
        Self {
            email: NOT_CONNECTED.to_string(),
            ..Self::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.email != NOT_CONNECTED
    }

    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        self.is_connected()
            && self
                .authorities
                .iter()
                .any(|held| authorities.contains(&held.as_str()))
    }
}

/// Session view that keeps "anonymous" apart from "fetched a user".
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No fetch has completed since the store was last reset.
    Unknown,
    Anonymous,
    Authenticated(User),
    Failed(FailureInfo),
}

impl From<AsyncState<User>> for SessionState {
    fn from(state: AsyncState<User>) -> Self {
        match state {
            AsyncState::Init => SessionState::Unknown,
            AsyncState::Ok(user) if user.is_connected() => SessionState::Authenticated(user),
            AsyncState::Ok(_) => SessionState::Anonymous,
            AsyncState::Error(failure) => SessionState::Failed(failure),
        }
    }
}

impl AuthPredicate for StateStore<User> {
    fn is_authenticated(&self) -> bool {
        self.read().value().is_some_and(User::is_connected)
    }
}
