//! Listings: models plus the landlord and tenant services.

mod landlord;
mod model;
mod tenant;

pub use landlord::LandlordListingService;
pub use model::{
    CardListing, CategoryName, CreatedListing, Description, LandlordView, Listing, NewListing,
    NewListingInfo, NewListingPicture, Page, Pagination, Picture, PriceVO, Search, TextVO,
    UnknownCategory, ValueVO,
};
pub use tenant::TenantListingService;
