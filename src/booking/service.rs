//! Booking operations, one store each.

use std::sync::Arc;

use uuid::Uuid;

use crate::booking::date_range::{DateRange, DateRangeSet};
use crate::booking::model::{BookedListing, CancelBooking, CreateBooking};
use crate::remote::{ApiRequest, RemoteOperation, Transport};
use crate::state::{StateStore, Status};

pub struct BookingService {
    create: RemoteOperation<CreateBooking, bool>,
    check_availability: RemoteOperation<Uuid, Vec<DateRange>>,
    booked_listings: RemoteOperation<(), Vec<BookedListing>>,
    cancel: RemoteOperation<CancelBooking, Uuid>,
    landlord_booked_listings: RemoteOperation<(), Vec<BookedListing>>,
}

impl BookingService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            create: RemoteOperation::from_endpoint("create-booking", &transport, |booking: CreateBooking| {
                ApiRequest::post("/booking/create").json(&booking)
            }),
            check_availability: RemoteOperation::from_endpoint(
                "check-availability",
                &transport,
                |listing: Uuid| {
                    Ok(ApiRequest::get("/booking/check-availability")
                        .query("listingPublicId", listing))
                },
            ),
            booked_listings: RemoteOperation::from_endpoint(
                "get-booked-listing",
                &transport,
                |()| Ok(ApiRequest::get("/booking/get-booked-listing")),
            ),
            cancel: RemoteOperation::from_endpoint("cancel-booking", &transport, |c: CancelBooking| {
                Ok(ApiRequest::delete("/booking/cancel")
                    .query("bookingPublicId", c.booking_public_id)
                    .query("listingPublicId", c.listing_public_id)
                    .query("byLandlord", c.by_landlord))
            }),
            landlord_booked_listings: RemoteOperation::from_endpoint(
                "get-booked-listing-for-landlord",
                &transport,
                |()| Ok(ApiRequest::get("/booking/get-booked-listing-for-landlord")),
            ),
        }
    }

    pub async fn create(&self, booking: CreateBooking) -> Status {
        self.create.run(booking).await
    }

    pub fn create_state(&self) -> &StateStore<bool> {
        self.create.store()
    }

    pub fn reset_create(&self) {
        self.create.store().reset();
    }

    /// Fetch the booked date ranges of a listing.
    pub async fn check_availability(&self, listing_public_id: Uuid) -> Status {
        self.check_availability.run(listing_public_id).await
    }

    pub fn check_availability_state(&self) -> &StateStore<Vec<DateRange>> {
        self.check_availability.store()
    }

    /// Unavailable days from the last successful availability check.
    pub fn unavailable_days(&self) -> Option<DateRangeSet> {
        self.check_availability
            .store()
            .read()
            .value()
            .map(|ranges| DateRangeSet::from_ranges(ranges))
    }

    pub async fn get_booked_listing(&self) -> Status {
        self.booked_listings.run(()).await
    }

    pub fn booked_listing_state(&self) -> &StateStore<Vec<BookedListing>> {
        self.booked_listings.store()
    }

    /// Cancel a booking; the store receives the cancelled booking's id.
    pub async fn cancel(&self, cancel: CancelBooking) -> Status {
        self.cancel.run(cancel).await
    }

    pub fn cancel_state(&self) -> &StateStore<Uuid> {
        self.cancel.store()
    }

    pub fn reset_cancel(&self) {
        self.cancel.store().reset();
    }

    pub async fn get_booked_listing_for_landlord(&self) -> Status {
        self.landlord_booked_listings.run(()).await
    }

    pub fn booked_listing_for_landlord_state(&self) -> &StateStore<Vec<BookedListing>> {
        self.landlord_booked_listings.store()
    }
}
