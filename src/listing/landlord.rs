//! Landlord-side listing management.

use std::sync::Arc;

use uuid::Uuid;

use crate::listing::model::{CardListing, CreatedListing, NewListing};
use crate::remote::{ApiRequest, RemoteOperation, Transport};
use crate::state::{StateStore, Status};

/// Create, list and delete the landlord's own listings.
///
/// Every operation writes only to its own store.
pub struct LandlordListingService {
    create: RemoteOperation<NewListing, CreatedListing>,
    get_all: RemoteOperation<(), Vec<CardListing>>,
    delete: RemoteOperation<Uuid, Uuid>,
}

impl LandlordListingService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            create: RemoteOperation::from_endpoint(
                "create-listing",
                &transport,
                |listing: NewListing| ApiRequest::post("/landlord-listing/create").json(&listing),
            ),
            get_all: RemoteOperation::from_endpoint("get-all-listings", &transport, |()| {
                Ok(ApiRequest::get("/landlord-listing/get-all"))
            }),
            delete: RemoteOperation::from_endpoint("delete-listing", &transport, |id: Uuid| {
                Ok(ApiRequest::delete("/landlord-listing/delete").query("publicId", id))
            }),
        }
    }

    pub async fn create(&self, listing: NewListing) -> Status {
        self.create.run(listing).await
    }

    pub fn create_state(&self) -> &StateStore<CreatedListing> {
        self.create.store()
    }

    pub fn reset_listing_creation(&self) {
        self.create.store().reset();
    }

    pub async fn get_all(&self) -> Status {
        self.get_all.run(()).await
    }

    pub fn get_all_state(&self) -> &StateStore<Vec<CardListing>> {
        self.get_all.store()
    }

    pub async fn delete(&self, public_id: Uuid) -> Status {
        self.delete.run(public_id).await
    }

    pub fn delete_state(&self) -> &StateStore<Uuid> {
        self.delete.store()
    }

    pub fn reset_delete(&self) {
        self.delete.store().reset();
    }
}
