//! Booking: availability, reservation and cancellation.

mod date_range;
mod model;
mod service;

pub use date_range::{BookingError, DateRange, DateRangeSet};
pub use model::{BookedListing, CancelBooking, CreateBooking};
pub use service::BookingService;
