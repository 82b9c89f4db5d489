//! Client core for a property-rental marketplace.
//!
//! Every remote operation (fetch listings, create a booking, ...) is
//! represented by an [`state::AsyncState`] held in a [`state::StateStore`]
//! owned by the service that runs it. The listing-creation wizard and the
//! booked-date model are plain data consumed by the controllers in [`ui`].

pub mod auth;
pub mod booking;
pub mod config;
pub mod listing;
pub mod logging;
pub mod remote;
pub mod state;
pub mod ui;
