//! End-to-end tests against a mocked backend

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bookline::auth::{redirect_after_401, Actor};
use bookline::error::Error;
use bookline::i18n::Locale;
use bookline::payments::{CardDetails, CardTokenizer};
use bookline::schedule::{SlotStatus, WeekView};
use bookline::Bookline;

fn auth_response(token: &str) -> serde_json::Value {
    json!({
        "access_token": token,
        "expires_in": 3600,
        "user": {
            "id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "phone": null,
            "role": "customer"
        }
    })
}

#[tokio::test]
async fn sign_in_stores_the_session_and_authenticates_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response("customer-token")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/customer/appointments"))
        .and(header("Authorization", "Bearer customer-token"))
        .and(header_exists("X-Visitor-Id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    let session = bookline
        .auth()
        .sign_in(Actor::Customer, "ada@example.com", "hunter22")
        .await
        .unwrap();

    assert_eq!(session.access_token, "customer-token");
    assert_eq!(session.actor, Actor::Customer);
    assert!(!session.is_expired());

    // the profile returned inline was cached
    let cached = bookline.session_store().cached_profile(Actor::Customer);
    assert!(cached.unwrap().contains("ada@example.com"));

    let appointments = bookline.appointments().for_customer().await.unwrap();
    assert!(appointments.is_empty());
}

#[tokio::test]
async fn staff_sign_in_uses_the_appoint_endpoints_and_namespace() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/appoint/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response("worker-token")))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    bookline
        .auth()
        .sign_in(Actor::Worker, "marco@example.com", "hunter22")
        .await
        .unwrap();

    let store = bookline.session_store();
    assert_eq!(
        store.load(Actor::Worker).unwrap().access_token,
        "worker-token"
    );
    // the customer namespace stays empty
    assert!(store.load(Actor::Customer).is_none());
}

#[tokio::test]
async fn a_401_clears_the_session_and_yields_the_sign_in_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response("stale-token")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/customer/appointments"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token expired"
        })))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    bookline
        .auth()
        .sign_in(Actor::Customer, "ada@example.com", "hunter22")
        .await
        .unwrap();

    let error = bookline.appointments().for_customer().await.unwrap_err();
    assert!(matches!(error, Error::Auth(_)));

    // both the current and the persisted session are gone
    let store = bookline.session_store();
    assert!(store.current().is_none());
    assert!(store.load(Actor::Customer).is_none());

    // the UI shell redirects, except when already on an auth route
    assert_eq!(
        redirect_after_401(Actor::Customer, "/dashboard"),
        Some("/signup")
    );
    assert_eq!(redirect_after_401(Actor::Customer, "/signup"), None);
}

#[tokio::test]
async fn appointment_shapes_normalize_at_the_fetch_boundary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/business/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "start_time": "2024-10-02T14:30:00",
                "customer_name": "Ada",
                "service": { "name": "Fade" },
                "status": "pending"
            },
            {
                "id": 2,
                "start_time": "2024-10-02 10:00:00",
                "serviceName": "Trim"
            },
            {
                "id": 3,
                "appointment_date": "2024-10-03",
                "appointment_time": "09:30",
                "workerName": "Marco"
            },
            { "id": 4, "date": "2024-10-04", "time": "14:30:00" },
            { "id": 5, "start_time": "not a timestamp" }
        ])))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    let appointments = bookline.appointments().for_business().await.unwrap();

    // the malformed record was dropped, not surfaced as an error
    assert_eq!(appointments.len(), 4);

    let view = WeekView::anchored(
        appointments,
        Locale::En,
        NaiveDate::from_ymd_opt(2024, 10, 2).unwrap(),
    );

    match view.slot_status(
        NaiveDate::from_ymd_opt(2024, 10, 2).unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
    ) {
        SlotStatus::Booked(detail) => {
            assert_eq!(detail.customer_name, "Ada");
            assert_eq!(detail.service_name, "Fade");
        }
        SlotStatus::Available => panic!("ISO shape should book its slot"),
    }

    // the legacy shape landed on the same weekday slot two days later
    assert!(matches!(
        view.slot_status(
            NaiveDate::from_ymd_opt(2024, 10, 4).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        ),
        SlotStatus::Booked(_)
    ));

    // split-field shape
    assert!(matches!(
        view.slot_status(
            NaiveDate::from_ymd_opt(2024, 10, 3).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        ),
        SlotStatus::Booked(_)
    ));
}

#[tokio::test]
async fn booking_flow_fetches_per_step_and_degrades_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "hair", "name": "Hair" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/categories/hair/businesses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b1", "name": "Sharp Cuts", "address": "1 Main St", "rating": 4.8 }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/businesses/b1/workers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "w1", "name": "Marco" },
            { "id": "w2", "name": "Deniz" }
        ])))
        .mount(&server)
        .await;

    // one worker's services endpoint is down
    Mock::given(method("GET"))
        .and(path("/api/workers/w1/services"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/workers/w2/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "s1", "name": "Fade", "duration": 30, "price": 2500 }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(json!({
            "business_id": "b1",
            "worker_id": "w2",
            "service_id": "s1",
            "date": "2024-10-02",
            "time": "14:30"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "appt-1",
            "status": "pending",
            "message": "see you there"
        })))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    let mut flow = bookline.booking_flow();

    flow.load_categories().await;
    let category = flow.selector().categories()[0].clone();
    flow.choose_category(category).await;

    let business = flow.selector().businesses()[0].clone();
    flow.choose_business(business).await;
    assert_eq!(flow.selector().workers().len(), 2);

    // the broken step degrades to an empty list instead of an error
    let unlucky = flow.selector().workers()[0].clone();
    flow.choose_worker(unlucky).await;
    assert!(flow.selector().services().is_empty());

    let lucky = flow.selector().workers()[1].clone();
    flow.choose_worker(lucky).await;
    assert_eq!(flow.selector().services().len(), 1);

    let service = flow.selector().services()[0].clone();
    flow.choose_service(service);

    // still incomplete: no date or time yet
    assert!(!flow.selector().can_submit());
    assert!(matches!(
        flow.submit(None).await,
        Err(Error::Validation(_))
    ));

    flow.choose_date(NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
    flow.choose_time(NaiveTime::from_hms_opt(14, 30, 0).unwrap());
    assert!(flow.selector().can_submit());

    let confirmation = flow.submit(None).await.unwrap();
    assert_eq!(confirmation.id, "appt-1");
    assert_eq!(confirmation.status.as_deref(), Some("pending"));
}

#[tokio::test]
async fn reschedule_and_cancel_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/appointments/appt-7/reschedule"))
        .and(body_json(json!({
            "appointment_date": "2024-10-09",
            "appointment_time": "11:00"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/appointments/appt-7/cancel"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    let appointments = bookline.appointments();

    appointments
        .reschedule(
            "appt-7",
            NaiveDate::from_ymd_opt(2024, 10, 9).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        )
        .await
        .unwrap();

    appointments.cancel("appt-7").await.unwrap();
}

#[tokio::test]
async fn sign_up_validation_failures_issue_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response("t")))
        .expect(0)
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    let result = bookline
        .auth()
        .sign_up(
            Actor::Customer,
            bookline::auth::SignUpRequest {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: None,
                password: "hunter22".into(),
                password_confirmation: "hunter23".into(),
            },
        )
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn places_autocomplete_goes_through_the_backend_proxy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/autocomplete"))
        .and(query_param("q", "1 main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "p1", "label": "1 Main Street" }
        ])))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    let suggestions = bookline.places().suggest("1 main").await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].label, "1 Main Street");

    // blank queries never hit the network
    assert!(bookline.places().suggest("  ").await.unwrap().is_empty());
}

#[tokio::test]
async fn payment_tokenizes_before_completing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payments/tokenize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok_123"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/payments/complete"))
        .and(body_json(json!({
            "booking_id": "appt-1",
            "token": "tok_123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pay-1",
            "status": "paid"
        })))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    let payments = bookline.payments();

    let token = payments
        .tokenizer()
        .tokenize(&CardDetails {
            number: "4242424242424242".into(),
            exp_month: 4,
            exp_year: 2027,
            cvc: "123".into(),
            holder_name: "Ada Lovelace".into(),
        })
        .await
        .unwrap();

    let confirmation = payments.complete("appt-1", &token).await.unwrap();
    assert_eq!(confirmation.id, "pay-1");
    assert_eq!(confirmation.status.as_deref(), Some("paid"));
}

#[tokio::test]
async fn profile_fetch_caches_the_blob() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/appoint/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "biz-token",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/appoint/auth/me"))
        .and(header("Authorization", "Bearer biz-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "b1",
            "name": "Sharp Cuts",
            "email": "owner@sharpcuts.example",
            "phone": "555-0100",
            "role": "business"
        })))
        .mount(&server)
        .await;

    let bookline = Bookline::new(&server.uri());
    bookline
        .auth()
        .sign_in(Actor::Business, "owner@sharpcuts.example", "hunter22")
        .await
        .unwrap();

    let profile = bookline.auth().profile().await.unwrap();
    assert_eq!(profile.name.as_deref(), Some("Sharp Cuts"));

    let cached = bookline.session_store().cached_profile(Actor::Business);
    assert!(cached.unwrap().contains("Sharp Cuts"));
}
