mod common;

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use common::{signed_in_auth, transport, MockTransport};
use staykit::auth::{AuthExpiredTransport, AuthService, LoginRequired};
use staykit::booking::BookingService;
use staykit::config::AuthConfig;
use staykit::remote::{ApiRequest, Transport};
use staykit::state::{FailureKind, Status};

#[tokio::test]
async fn unauthorized_call_while_signed_in_requests_login_and_stays_an_error() {
    let mock = MockTransport::new();
    let auth = signed_in_auth(&mock).await;
    let (guarded, mut login) = AuthExpiredTransport::new(transport(&mock), &auth);
    let booking = BookingService::new(Arc::new(guarded));

    mock.fail(401, "token expired");
    assert_eq!(booking.get_booked_listing().await, Status::Error);

    let state = booking.booked_listing_state().read();
    assert_eq!(state.error().map(|f| f.kind), Some(FailureKind::Unauthorized));
    assert_eq!(
        login.try_recv().ok(),
        Some(LoginRequired {
            login_url: auth.login_url().to_string(),
            path: "/booking/get-booked-listing".to_string(),
        })
    );
}

#[tokio::test]
async fn anonymous_unauthorized_call_does_not_request_login() {
    let mock = MockTransport::new();
    let auth = AuthService::new(transport(&mock), &AuthConfig::default());
    let (guarded, mut login) = AuthExpiredTransport::new(transport(&mock), &auth);
    let booking = BookingService::new(Arc::new(guarded));

    mock.fail(401, "no session");
    assert_eq!(booking.check_availability(Uuid::nil()).await, Status::Error);
    assert!(login.try_recv().is_err());
}

#[tokio::test]
async fn auth_endpoints_and_other_failures_pass_silently() {
    let mock = MockTransport::new();
    let auth = signed_in_auth(&mock).await;
    let (guarded, mut login) = AuthExpiredTransport::new(transport(&mock), &auth);

    mock.fail(401, "resync rejected");
    let failure = guarded
        .execute(ApiRequest::get("/auth/get-authenticated-user"))
        .await
        .unwrap_err();
    assert!(failure.is_unauthorized());

    mock.fail(403, "forbidden");
    assert!(guarded.execute(ApiRequest::get("/booking/get-booked-listing")).await.is_err());

    mock.respond(json!([]));
    assert_eq!(
        guarded.execute(ApiRequest::get("/landlord-listing/get-all")).await,
        Ok(json!([]))
    );

    assert!(login.try_recv().is_err());
}
