use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Listing category, as understood by the `category` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryName {
    #[default]
    All,
    AmazingViews,
    Omg,
    Treehouses,
    Beach,
    Farms,
    TinyHomes,
    Lake,
    Containers,
    Camping,
    Castle,
    Arctic,
    Boat,
    BedAndBreakfasts,
    Rooms,
    EarthHomes,
    Tower,
    Caves,
    Luxes,
    ChefsKitchen,
}

impl CategoryName {
    pub const ALL: [CategoryName; 20] = [
        CategoryName::All,
        CategoryName::AmazingViews,
        CategoryName::Omg,
        CategoryName::Treehouses,
        CategoryName::Beach,
        CategoryName::Farms,
        CategoryName::TinyHomes,
        CategoryName::Lake,
        CategoryName::Containers,
        CategoryName::Camping,
        CategoryName::Castle,
        CategoryName::Arctic,
        CategoryName::Boat,
        CategoryName::BedAndBreakfasts,
        CategoryName::Rooms,
        CategoryName::EarthHomes,
        CategoryName::Tower,
        CategoryName::Caves,
        CategoryName::Luxes,
        CategoryName::ChefsKitchen,
    ];

    /// Wire name, e.g. `AMAZING_VIEWS`.
    pub fn technical_name(&self) -> &'static str {
        match self {
            CategoryName::All => "ALL",
            CategoryName::AmazingViews => "AMAZING_VIEWS",
            CategoryName::Omg => "OMG",
            CategoryName::Treehouses => "TREEHOUSES",
            CategoryName::Beach => "BEACH",
            CategoryName::Farms => "FARMS",
            CategoryName::TinyHomes => "TINY_HOMES",
            CategoryName::Lake => "LAKE",
            CategoryName::Containers => "CONTAINERS",
            CategoryName::Camping => "CAMPING",
            CategoryName::Castle => "CASTLE",
            CategoryName::Arctic => "ARCTIC",
            CategoryName::Boat => "BOAT",
            CategoryName::BedAndBreakfasts => "BED_AND_BREAKFASTS",
            CategoryName::Rooms => "ROOMS",
            CategoryName::EarthHomes => "EARTH_HOMES",
            CategoryName::Tower => "TOWER",
            CategoryName::Caves => "CAVES",
            CategoryName::Luxes => "LUXES",
            CategoryName::ChefsKitchen => "CHEFS_KITCHEN",
        }
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.technical_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryName {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        CategoryName::ALL
            .into_iter()
            .find(|c| c.technical_name() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Wrapped integer as the API sends it (`{"value": 3}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueVO {
    pub value: u32,
}

/// Nightly price in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceVO {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextVO {
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewListingInfo {
    pub guests: ValueVO,
    pub bedrooms: ValueVO,
    pub beds: ValueVO,
    pub baths: ValueVO,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Description {
    pub title: TextVO,
    pub description: TextVO,
}

/// Picture as returned by the API (base64 payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub file: String,
    pub file_content_type: String,
    #[serde(default)]
    pub is_cover: bool,
}

/// Picture picked in the creation wizard; only its name travels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListingPicture {
    pub file_name: String,
}

/// Listing being assembled by the creation wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewListing {
    pub category: CategoryName,
    pub location: String,
    pub infos: NewListingInfo,
    pub pictures: Vec<NewListingPicture>,
    pub description: Description,
    pub price: PriceVO,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedListing {
    pub public_id: Uuid,
}

/// Summary card shown in listing grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListing {
    pub price: PriceVO,
    pub location: String,
    #[serde(default)]
    pub cover: Option<Picture>,
    pub booking_category: CategoryName,
    pub public_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordView {
    pub firstname: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Full listing detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub description: Description,
    #[serde(default)]
    pub pictures: Vec<Picture>,
    pub infos: NewListingInfo,
    pub price: PriceVO,
    pub category: CategoryName,
    pub location: String,
    #[serde(default)]
    pub landlord: LandlordView,
}

/// Search criteria for `/tenant-listing/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Search {
    pub dates: crate::booking::DateRange,
    pub infos: NewListingInfo,
    pub location: String,
}

/// One page of a paginated response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// Page request sent as query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: Vec::new(),
        }
    }
}

impl Pagination {
    /// Query parameters for this page request.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        query.extend(self.sort.iter().map(|s| ("sort".to_string(), s.clone())));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_round_trips_through_technical_name() {
        for category in CategoryName::ALL {
            assert_eq!(category.technical_name().parse::<CategoryName>(), Ok(category));
        }
        assert_eq!("tiny-homes".parse::<CategoryName>(), Ok(CategoryName::TinyHomes));
        assert_eq!(
            "skyscrapers".parse::<CategoryName>(),
            Err(UnknownCategory("skyscrapers".to_string()))
        );
    }

    #[test]
    fn category_serde_matches_technical_name() {
        assert_eq!(
            serde_json::to_value(CategoryName::BedAndBreakfasts).unwrap(),
            json!("BED_AND_BREAKFASTS")
        );
    }

    #[test]
    fn pagination_query_repeats_sort() {
        let pagination = Pagination {
            page: 1,
            size: 12,
            sort: vec!["price,asc".to_string(), "location".to_string()],
        };
        assert_eq!(
            pagination.to_query(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "12".to_string()),
                ("sort".to_string(), "price,asc".to_string()),
                ("sort".to_string(), "location".to_string()),
            ]
        );
    }

    #[test]
    fn page_decodes_spring_shape() {
        let page: Page<CardListing> = serde_json::from_value(json!({
            "content": [{
                "price": {"value": 120},
                "location": "FR",
                "bookingCategory": "BEACH",
                "publicId": "6f1c2a4e-1d1b-4d2a-9c1e-0c5d0b6a7f11"
            }],
            "totalElements": 1,
            "totalPages": 1,
            "number": 0,
            "size": 20
        }))
        .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].booking_category, CategoryName::Beach);
        assert!(page.content[0].cover.is_none());
    }
}
