// Integration tests for Event Concierge HTTP API

use actix_web::{dev::ServiceResponse, http::StatusCode, test, web, App};
use event_concierge::assistant::Assistant;
use event_concierge::core::EventMatcher;
use event_concierge::routes::{self, AppState};
use event_concierge::services::{AuthService, InMemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;

fn create_state() -> AppState {
    let matcher = EventMatcher::with_default_config();
    AppState {
        store: Arc::new(InMemoryStore::seeded()),
        auth: Arc::new(AuthService::new("integration-secret", 3600)),
        assistant: Assistant::new(matcher.clone(), 3),
        matcher,
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(routes::json_config())
                .app_data(routes::query_config())
                .configure(routes::configure_routes),
        )
        .await
    };
}

async fn body_json(resp: ServiceResponse) -> Value {
    test::read_body_json(resp).await
}

macro_rules! login_token {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": $username, "password": $password }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_health() {
    let state = create_state();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["events"], 5);
}

#[actix_web::test]
async fn test_list_and_filter_events() {
    let state = create_state();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/events").to_request()).await;
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 5);

    let req = test::TestRequest::get()
        .uri("/api/events?category=technology")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "AI & Future Tech Summit");
    assert_eq!(events[0]["imageUrl"], "https://picsum.photos/seed/tech/800/600");
}

#[actix_web::test]
async fn test_get_missing_event() {
    let state = create_state();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/events/404").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["status_code"], 404);
}

#[actix_web::test]
async fn test_search_ranks_events() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/events/search")
        .set_json(json!({ "query": "music festival" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["id"], "1");
    assert!(results[0]["score"].as_u64().unwrap() >= 8);
    assert_eq!(body["totalCandidates"], 5);
}

#[actix_web::test]
async fn test_chat_recommends_and_falls_back() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "find a music festival" }))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["intent"], "search");
    assert_eq!(body["suggestedEvents"][0]["id"], "1");

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "zzzz" }))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let suggested = body["suggestedEvents"].as_array().unwrap();
    assert_eq!(suggested.len(), 3);
    // highest priced first
    assert_eq!(suggested[0]["id"], "2");
    assert!(body["response"].as_str().unwrap().starts_with("I couldn't find exact matches"));
}

#[actix_web::test]
async fn test_chat_rejects_empty_message() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_is_reported() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_login_failures() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "admin", "password": "nope" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "admin" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_event_admin_routes_require_admin() {
    let state = create_state();
    let app = init_app!(state);
    let new_event = json!({
        "title": "Harbour Gala",
        "date": "2024-12-01",
        "location": "Marina, Chennai",
        "category": "Gala",
        "organizer": "Coastline",
        "price": 0
    });

    // No token
    let req = test::TestRequest::post().uri("/api/events").set_json(&new_event).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    // Bad token
    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .set_json(&new_event)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // Regular user
    let user_token = login_token!(app, "user1", "pass123");
    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .set_json(&new_event)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // Admin
    let admin_token = login_token!(app, "admin", "admin123");
    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(&new_event)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    // The new event is immediately searchable
    let req = test::TestRequest::post()
        .uri("/api/events/search")
        .set_json(json!({ "query": "free gala in chennai" }))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["results"][0]["id"], id.as_str());

    // Update and delete
    let req = test::TestRequest::put()
        .uri(&format!("/api/events/{}", id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "featured": true }))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["featured"], true);
    assert_eq!(body["title"], "Harbour Gala");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/events/{}", id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_booking_flow() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(json!({
            "eventId": "4",
            "userName": "Asha",
            "userEmail": "asha@example.com",
            "guestCount": 3,
            "userId": "1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["eventName"], "Contemporary Art Expo");
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["message"], "Booking requested. Awaiting admin approval.");
    let booking_id = created["id"].as_str().unwrap().to_string();

    // Users see their own bookings
    let user_token = login_token!(app, "user1", "pass123");
    let req = test::TestRequest::get()
        .uri("/api/bookings")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    // ...but not everyone's
    let req = test::TestRequest::get()
        .uri("/api/bookings?role=admin")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // Admin approves
    let admin_token = login_token!(app, "admin", "admin123");
    let req = test::TestRequest::put()
        .uri(&format!("/api/bookings/{}", booking_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "status": "approved", "adminNote": "See you there" }))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["status"], "Approved");
    assert_eq!(body["adminNote"], "See you there");

    let req = test::TestRequest::put()
        .uri(&format!("/api/bookings/{}", booking_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "status": "cancelled" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_booking_for_unknown_event() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(json!({
            "eventId": "999",
            "userName": "Asha",
            "userEmail": "asha@example.com",
            "guestCount": 3
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_subscriber_flow() {
    let state = create_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/subscribers")
        .set_json(json!({ "email": "new@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/subscribers")
        .set_json(json!({ "email": "NEW@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/subscribers")
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let admin_token = login_token!(app, "admin", "admin123");
    let req = test::TestRequest::get()
        .uri("/api/subscribers")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::delete()
        .uri("/api/subscribers/new@example.com")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri("/api/subscribers/new@example.com")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
