//! Base trait for controller state in MVI architecture.

/// Marker trait for controller state.
///
/// A state is replaced, never edited in place by a view: reducers take it
/// by value and return the successor. `PartialEq` lets a controller skip
/// re-rendering when an intent changed nothing.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
