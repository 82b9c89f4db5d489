//! Authentication state consumed by the rest of the client.

mod expired;
mod predicate;
mod service;
mod user;

pub use expired::{AuthExpiredTransport, LoginRequired};
pub use predicate::AuthPredicate;
pub use service::AuthService;
pub use user::{SessionState, User, NOT_CONNECTED};
