mod common;

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use common::{signed_in_auth, transport, MockTransport};
use staykit::auth::AuthPredicate;
use staykit::booking::{BookingService, CancelBooking, CreateBooking, DateRangeSet};
use staykit::remote::Method;
use staykit::state::{FailureKind, Status};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

const LISTING: &str = "6f1c1f5e-5f7a-4c2a-9a55-2b8a7d1c0e11";
const BOOKING: &str = "0b6d3f0e-9a1b-4f7c-8e2d-5c4b3a291807";

#[tokio::test]
async fn availability_feeds_unavailable_days() {
    let mock = MockTransport::new();
    let service = BookingService::new(transport(&mock));
    mock.respond(json!([
        { "startDate": "2024-01-01T00:00:00Z", "endDate": "2024-01-03T00:00:00Z" },
        { "startDate": "2024-01-10", "endDate": "2024-01-10" }
    ]));

    let listing = Uuid::parse_str(LISTING).unwrap();
    assert_eq!(service.check_availability(listing).await, Status::Ok);

    let request = mock.last_request();
    assert_eq!(request.path, "/booking/check-availability");
    assert_eq!(request.query_value("listingPublicId"), Some(LISTING));

    let unavailable = service.unavailable_days().expect("availability loaded");
    assert_eq!(unavailable.len(), 4);
    assert!(unavailable.contains(day(1, 2)));
    assert!(unavailable.contains(day(1, 10)));
    assert!(!unavailable.contains(day(1, 4)));
}

#[tokio::test]
async fn unavailable_days_absent_until_loaded() {
    let mock = MockTransport::new();
    let service = BookingService::new(transport(&mock));
    assert!(service.unavailable_days().is_none());

    mock.fail(404, "no listing");
    assert_eq!(service.check_availability(Uuid::nil()).await, Status::Error);
    assert!(service.unavailable_days().is_none());
}

#[tokio::test]
async fn bookability_combines_overlap_and_session() {
    let mock = MockTransport::new();
    let auth = signed_in_auth(&mock).await;
    let service = BookingService::new(transport(&mock));
    mock.respond(json!([{ "startDate": "2024-01-01", "endDate": "2024-01-03" }]));
    service.check_availability(Uuid::nil()).await;

    let unavailable: DateRangeSet = service.unavailable_days().unwrap();
    assert!(auth.is_authenticated());
    assert!(unavailable.is_bookable(day(1, 4), day(1, 7), &auth));
    assert!(!unavailable.is_bookable(day(1, 2), day(1, 6), &auth));
    assert!(!unavailable.is_bookable(day(1, 7), day(1, 4), &auth));
    assert!(!unavailable.is_bookable(day(1, 4), day(1, 7), &|| false));
    assert_eq!(DateRangeSet::price_estimate(day(1, 4), day(1, 7), 100), 300);
}

#[tokio::test]
async fn create_posts_calendar_days() {
    let mock = MockTransport::new();
    let service = BookingService::new(transport(&mock));
    mock.respond(json!(true));

    let booking = CreateBooking {
        listing_public_id: Uuid::parse_str(LISTING).unwrap(),
        start_date: day(2, 1),
        end_date: day(2, 3),
    };
    assert_eq!(service.create(booking).await, Status::Ok);
    assert_eq!(service.create_state().read().into_value(), Some(true));

    let request = mock.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/booking/create");
    assert_eq!(
        request.body,
        Some(json!({
            "listingPublicId": LISTING,
            "startDate": "2024-02-01",
            "endDate": "2024-02-03",
        }))
    );

    service.reset_create();
    assert_eq!(service.create_state().status(), Status::Init);
}

#[tokio::test]
async fn cancel_sends_ids_as_query() {
    let mock = MockTransport::new();
    let service = BookingService::new(transport(&mock));
    mock.respond(json!(BOOKING));

    let cancel = CancelBooking {
        booking_public_id: Uuid::parse_str(BOOKING).unwrap(),
        listing_public_id: Uuid::parse_str(LISTING).unwrap(),
        by_landlord: true,
    };
    assert_eq!(service.cancel(cancel).await, Status::Ok);

    let request = mock.last_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.query_value("bookingPublicId"), Some(BOOKING));
    assert_eq!(request.query_value("listingPublicId"), Some(LISTING));
    assert_eq!(request.query_value("byLandlord"), Some("true"));
    assert!(request.body.is_none());

    assert_eq!(
        service.cancel_state().read().into_value(),
        Some(Uuid::parse_str(BOOKING).unwrap())
    );
    service.reset_cancel();
    assert_eq!(service.cancel_state().status(), Status::Init);
}

#[tokio::test]
async fn booked_listings_decode_and_stay_separate() {
    let mock = MockTransport::new();
    let service = BookingService::new(transport(&mock));
    mock.respond(json!([{
        "location": "Lisbon",
        "cover": null,
        "totalPrice": { "value": 450 },
        "dates": { "startDate": "2024-03-01", "endDate": "2024-03-04" },
        "bookingPublicId": BOOKING,
        "listingPublicId": LISTING,
    }]));
    mock.fail(403, "not a landlord");

    assert_eq!(service.get_booked_listing().await, Status::Ok);
    assert_eq!(service.get_booked_listing_for_landlord().await, Status::Error);

    let mine = service.booked_listing_state().read().into_value().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].total_price.value, 450);
    assert_eq!(mine[0].dates.end_date(), day(3, 4));

    let landlord = service.booked_listing_for_landlord_state().read();
    assert_eq!(landlord.error().map(|f| f.kind), Some(FailureKind::Forbidden));
    assert_eq!(
        mock.requests().last().map(|r| r.path.clone()),
        Some("/booking/get-booked-listing-for-landlord".to_string())
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mock = MockTransport::new();
    let service = BookingService::new(transport(&mock));
    mock.respond(json!({ "unexpected": true }));

    assert_eq!(service.check_availability(Uuid::nil()).await, Status::Error);
    let state = service.check_availability_state().read();
    assert_eq!(state.error().map(|f| f.kind), Some(FailureKind::Decode));
}
