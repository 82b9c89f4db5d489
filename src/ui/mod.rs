//! Controllers that sit between the services and a view.
//!
//! Views are out of scope; these types hold exactly the state a view
//! would render and expose the handlers it would call.

pub mod book_date;
pub mod listing_create;
pub mod mvi;
pub mod wizard;
