//! Lifecycle state of remote operations.
//!
//! ```text
//! RemoteOperation ──set──→ StateStore<T> ──notify──→ observers
//!                               │
//!                               └── read() / reset()
//! ```
//!
//! - **AsyncState**: immutable INIT / OK / ERROR snapshot
//! - **StateStore**: the single mutation point for one operation's state

mod async_state;
mod store;

pub use async_state::{AsyncState, FailureInfo, FailureKind, Status};
pub use store::{StateObserver, StateStore, Subscription};
