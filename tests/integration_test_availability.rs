mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::Weekday;
use common::{body_json, book, next_weekday, owner_request, TestApp};
use serde_json::json;
use tower::ServiceExt;

async fn fetch_slots(app: &TestApp, slug: &str, service_id: &str, date: &str) -> Vec<String> {
    let response = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/api/v1/businesses/{}/services/{}/slots?date={}", slug, service_id, date))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_hourly_slots_run_to_last_full_hour() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let service = app.create_service("owner-1", "Haircut", 60, 4500).await;
    let date = next_weekday(Weekday::Mon).to_string();

    let slots = fetch_slots(&app, "studio-glow", service["id"].as_str().unwrap(), &date).await;

    let expected: Vec<String> = (9..18).map(|h| format!("{:02}:00", h)).collect();
    assert_eq!(slots, expected);
}

#[tokio::test]
async fn test_closed_day_has_no_slots() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let service = app.create_service("owner-1", "Haircut", 60, 4500).await;
    let date = next_weekday(Weekday::Sun).to_string();

    let slots = fetch_slots(&app, "studio-glow", service["id"].as_str().unwrap(), &date).await;
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_booking_removes_slot() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let service = app.create_service("owner-1", "Haircut", 60, 4500).await;
    let service_id = service["id"].as_str().unwrap();
    let date = next_weekday(Weekday::Mon).to_string();

    let response = book(&app, "client-1", "studio-glow", service_id, &date, "12:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    let slots = fetch_slots(&app, "studio-glow", service_id, &date).await;
    assert!(!slots.contains(&"12:00".to_string()), "12:00 should be taken");
    assert!(slots.contains(&"13:00".to_string()), "13:00 should be free");
}

#[tokio::test]
async fn test_longer_appointment_blocks_shorter_grid() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let long = app.create_service("owner-1", "Haircut", 60, 4500).await;
    let short = app.create_service("owner-1", "Quick Trim", 30, 2000).await;
    let date = next_weekday(Weekday::Mon).to_string();

    let response = book(&app, "client-1", "studio-glow", long["id"].as_str().unwrap(), &date, "10:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    // The 60 minute appointment occupies two candidates of the 30 minute
    // grid, not just the one with the matching start time.
    let slots = fetch_slots(&app, "studio-glow", short["id"].as_str().unwrap(), &date).await;
    assert!(slots.contains(&"09:30".to_string()));
    assert!(!slots.contains(&"10:00".to_string()));
    assert!(!slots.contains(&"10:30".to_string()));
    assert!(slots.contains(&"11:00".to_string()));
}

#[tokio::test]
async fn test_ninety_minute_morning_scenario() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let service = app.create_service("owner-1", "Deep Treatment", 90, 12000).await;
    let service_id = service["id"].as_str().unwrap();

    let payload = json!({
        "monday": { "active": true, "start_time": "09:00", "end_time": "12:00" }
    });
    let response = app.router.clone().oneshot(
        owner_request("owner-1", "PUT", "/api/v1/my-business/schedule")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let date = next_weekday(Weekday::Mon).to_string();

    let slots = fetch_slots(&app, "studio-glow", service_id, &date).await;
    assert_eq!(slots, vec!["09:00".to_string(), "10:30".to_string()]);

    let response = book(&app, "client-1", "studio-glow", service_id, &date, "09:00").await;
    assert_eq!(response.status(), StatusCode::OK);

    let slots = fetch_slots(&app, "studio-glow", service_id, &date).await;
    assert_eq!(slots, vec!["10:30".to_string()]);
}

#[tokio::test]
async fn test_past_date_rejected() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let service = app.create_service("owner-1", "Haircut", 60, 4500).await;

    let response = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!(
                "/api/v1/businesses/studio-glow/services/{}/slots?date=2020-01-06",
                service["id"].as_str().unwrap()
            ))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_available_dates_skip_closed_days() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let service = app.create_service("owner-1", "Haircut", 60, 4500).await;

    let monday = next_weekday(Weekday::Mon);
    let sunday = monday + chrono::Duration::days(6);

    let response = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!(
                "/api/v1/businesses/studio-glow/services/{}/dates?start={}&end={}",
                service["id"].as_str().unwrap(),
                monday,
                sunday
            ))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let dates = body_json(response).await;
    let dates: Vec<&str> = dates.as_array().unwrap().iter().map(|d| d.as_str().unwrap()).collect();

    // Default schedule: Monday through Friday open, weekend closed.
    assert_eq!(dates.len(), 5);
    assert!(dates.contains(&monday.to_string().as_str()));
    assert!(!dates.contains(&sunday.to_string().as_str()));
}

#[tokio::test]
async fn test_available_dates_range_limit() {
    let app = TestApp::new().await;
    app.register_business("owner-1", "Studio Glow").await;
    let service = app.create_service("owner-1", "Haircut", 60, 4500).await;

    let start = next_weekday(Weekday::Mon);
    let end = start + chrono::Duration::days(180);

    let response = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!(
                "/api/v1/businesses/studio-glow/services/{}/dates?start={}&end={}",
                service["id"].as_str().unwrap(),
                start,
                end
            ))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
