use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::date_range::DateRange;
use crate::listing::{Picture, PriceVO};

/// Request body for `/booking/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub listing_public_id: Uuid,
    #[serde(with = "calendar_day")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_day")]
    pub end_date: NaiveDate,
}

/// A reservation as listed to its tenant or landlord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedListing {
    pub location: String,
    #[serde(default)]
    pub cover: Option<Picture>,
    pub total_price: PriceVO,
    pub dates: DateRange,
    pub booking_public_id: Uuid,
    pub listing_public_id: Uuid,
}

/// Parameters of `/booking/cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelBooking {
    pub booking_public_id: Uuid,
    pub listing_public_id: Uuid,
    pub by_landlord: bool,
}

/// Serde adapter for calendar days.
///
/// Writes `YYYY-MM-DD`; reads either that or an RFC 3339 / ISO date-time,
/// keeping only the calendar day.
pub(crate) mod calendar_day {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&day.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid calendar day '{raw}'")))
    }

    pub(crate) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|dt| dt.date())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn calendar_day_accepts_dates_and_datetimes() {
        assert_eq!(calendar_day::parse("2024-01-02"), Some(day(1, 2)));
        assert_eq!(calendar_day::parse("2024-01-02T18:30:00Z"), Some(day(1, 2)));
        assert_eq!(calendar_day::parse("2024-01-02T23:59:59.123+02:00"), Some(day(1, 2)));
        assert_eq!(calendar_day::parse("2024-01-02T08:00:00"), Some(day(1, 2)));
        assert_eq!(calendar_day::parse("tomorrow"), None);
    }

    #[test]
    fn booked_dates_drop_time_of_day() {
        let range: DateRange = serde_json::from_value(json!({
            "startDate": "2024-01-01T14:00:00Z",
            "endDate": "2024-01-03T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(range.start_date(), day(1, 1));
        assert_eq!(range.end_date(), day(1, 3));
    }

    #[test]
    fn create_booking_serializes_plain_days() {
        let id = Uuid::nil();
        let body = serde_json::to_value(CreateBooking {
            listing_public_id: id,
            start_date: day(1, 4),
            end_date: day(1, 6),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "listingPublicId": "00000000-0000-0000-0000-000000000000",
                "startDate": "2024-01-04",
                "endDate": "2024-01-06"
            })
        );
    }
}
