//! Controller behind the booking date picker.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::AuthPredicate;
use crate::booking::{CreateBooking, DateRange, DateRangeSet};
use crate::listing::PriceVO;
use crate::state::{AsyncState, FailureInfo};

pub struct BookDateController {
    listing_public_id: Uuid,
    price_per_night: PriceVO,
    unavailable: DateRangeSet,
    selection: Option<(NaiveDate, NaiveDate)>,
    bookable: bool,
    total_price: i64,
}

impl BookDateController {
    pub fn new(listing_public_id: Uuid, price_per_night: PriceVO) -> Self {
        Self {
            listing_public_id,
            price_per_night,
            unavailable: DateRangeSet::new(),
            selection: None,
            bookable: false,
            total_price: 0,
        }
    }

    /// Apply an availability-store transition.
    ///
    /// Returns the failure to report when the check failed.
    pub fn on_availability(&mut self, state: &AsyncState<Vec<DateRange>>) -> Option<FailureInfo> {
        match state {
            AsyncState::Init => None,
            AsyncState::Ok(ranges) => {
                self.unavailable = DateRangeSet::from_ranges(ranges);
                tracing::debug!(days = self.unavailable.len(), "unavailable days refreshed");
                None
            }
            AsyncState::Error(failure) => Some(failure.clone()),
        }
    }

    /// Whether the picker should disable `day`.
    pub fn is_unavailable(&self, day: NaiveDate) -> bool {
        self.unavailable.contains(day)
    }

    pub fn unavailable_days(&self) -> &DateRangeSet {
        &self.unavailable
    }

    /// Record a new selection and recompute the total; returns whether the
    /// selection can be booked.
    pub fn on_date_change(&mut self, start: NaiveDate, end: NaiveDate, auth: &dyn AuthPredicate) -> bool {
        self.selection = Some((start, end));
        self.bookable = self.unavailable.is_bookable(start, end, auth);
        self.total_price = if self.bookable {
            DateRangeSet::price_estimate(start, end, self.price_per_night.value)
        } else {
            0
        };
        self.bookable
    }

    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    /// Booking request for the current selection, if it is bookable.
    pub fn new_booking(&self) -> Option<CreateBooking> {
        let (start_date, end_date) = self.selection.filter(|_| self.bookable)?;
        Some(CreateBooking {
            listing_public_id: self.listing_public_id,
            start_date,
            end_date,
        })
    }
}
