//! Tenant-side browsing and search.

use std::sync::Arc;

use uuid::Uuid;

use crate::listing::model::{CardListing, CategoryName, Listing, Page, Pagination, Search};
use crate::remote::{ApiRequest, RemoteOperation, Transport};
use crate::state::{StateStore, Status};

fn paged(mut request: ApiRequest, pagination: &Pagination) -> ApiRequest {
    request.query.extend(pagination.to_query());
    request
}

pub struct TenantListingService {
    by_category: RemoteOperation<(Pagination, CategoryName), Page<CardListing>>,
    one_by_public_id: RemoteOperation<Uuid, Listing>,
    search: RemoteOperation<(Search, Pagination), Page<CardListing>>,
}

impl TenantListingService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            by_category: RemoteOperation::from_endpoint(
                "get-all-by-category",
                &transport,
                |(pagination, category): (Pagination, CategoryName)| {
                    let request = ApiRequest::get("/tenant-listing/get-all-by-category");
                    Ok(paged(request, &pagination).query("category", category))
                },
            ),
            one_by_public_id: RemoteOperation::from_endpoint(
                "get-one-listing",
                &transport,
                |id: Uuid| Ok(ApiRequest::get("/tenant-listing/get-one").query("publicId", id)),
            ),
            search: RemoteOperation::from_endpoint(
                "search-listing",
                &transport,
                |(search, pagination): (Search, Pagination)| {
                    let request = ApiRequest::post("/tenant-listing/search").json(&search)?;
                    Ok(paged(request, &pagination))
                },
            ),
        }
    }

    pub async fn get_all_by_category(&self, pagination: Pagination, category: CategoryName) -> Status {
        self.by_category.run((pagination, category)).await
    }

    pub fn get_all_by_category_state(&self) -> &StateStore<Page<CardListing>> {
        self.by_category.store()
    }

    pub fn reset_get_all_by_category(&self) {
        self.by_category.store().reset();
    }

    pub async fn get_one_by_public_id(&self, public_id: Uuid) -> Status {
        self.one_by_public_id.run(public_id).await
    }

    pub fn get_one_by_public_id_state(&self) -> &StateStore<Listing> {
        self.one_by_public_id.store()
    }

    pub fn reset_get_one_by_public_id(&self) {
        self.one_by_public_id.store().reset();
    }

    pub async fn search(&self, search: Search, pagination: Pagination) -> Status {
        self.search.run((search, pagination)).await
    }

    pub fn search_state(&self) -> &StateStore<Page<CardListing>> {
        self.search.store()
    }
}
