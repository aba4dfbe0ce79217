use slotbook::{
    api::router::create_router,
    config::Config,
    domain::models::notification::BookingConfirmation,
    domain::ports::NotificationService,
    domain::services::booking::BookingService,
    error::AppError,
    infra::repositories::{
        sqlite_appointment_repo::SqliteAppointmentRepo,
        sqlite_business_repo::SqliteBusinessRepo,
        sqlite_service_repo::SqliteServiceRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockNotifier;

#[async_trait]
impl NotificationService for MockNotifier {
    async fn send_confirmation(&self, _confirmation: &BookingConfirmation) -> Result<(), AppError> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
        };

        let appointment_repo = Arc::new(SqliteAppointmentRepo::new(pool.clone()));
        let booking_service = Arc::new(BookingService::new(appointment_repo.clone()));

        let state = Arc::new(AppState {
            config,
            business_repo: Arc::new(SqliteBusinessRepo::new(pool.clone())),
            service_repo: Arc::new(SqliteServiceRepo::new(pool.clone())),
            appointment_repo,
            booking_service,
            notifier: Arc::new(MockNotifier),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a business for the given owner and returns the response body.
    #[allow(dead_code)]
    pub async fn register_business(&self, owner_id: &str, name: &str) -> Value {
        let response = self.router.clone().oneshot(
            owner_request(owner_id, "POST", "/api/v1/businesses")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::json!({ "name": name }).to_string()))
                .unwrap()
        ).await.unwrap();
        assert!(
            response.status().is_success(),
            "register_business failed: {}",
            response.status()
        );
        body_json(response).await
    }

    #[allow(dead_code)]
    pub async fn create_service(
        &self,
        owner_id: &str,
        name: &str,
        duration_min: i32,
        price_cents: i64,
    ) -> Value {
        let payload = serde_json::json!({
            "name": name,
            "description": "Test service",
            "duration_min": duration_min,
            "price_cents": price_cents
        });
        let response = self.router.clone().oneshot(
            owner_request(owner_id, "POST", "/api/v1/my-business/services")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();
        assert!(
            response.status().is_success(),
            "create_service failed: {}",
            response.status()
        );
        body_json(response).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

/// Request builder preloaded with business-owner identity headers.
pub fn owner_request(owner_id: &str, method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", owner_id)
        .header("X-User-Name", "Owner")
        .header("X-User-Email", format!("{}@example.com", owner_id))
        .header("X-User-Role", "business-owner")
}

/// Request builder preloaded with client identity headers.
#[allow(dead_code)]
pub fn client_request(client_id: &str, method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", client_id)
        .header("X-User-Name", format!("Client {}", client_id))
        .header("X-User-Email", format!("{}@example.com", client_id))
        .header("X-User-Role", "client")
}

#[allow(dead_code)]
pub async fn book(
    app: &TestApp,
    client_id: &str,
    slug: &str,
    service_id: &str,
    date: &str,
    time: &str,
) -> axum::response::Response {
    app.router.clone().oneshot(
        client_request(
            client_id,
            "POST",
            &format!("/api/v1/businesses/{}/services/{}/book", slug, service_id),
        )
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "date": date, "time": time }).to_string()))
        .unwrap()
    ).await.unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// First occurrence of the weekday strictly after today.
#[allow(dead_code)]
pub fn next_weekday(weekday: chrono::Weekday) -> chrono::NaiveDate {
    use chrono::Datelike;
    let mut date = chrono::Utc::now().naive_utc().date() + chrono::Duration::days(1);
    while date.weekday() != weekday {
        date += chrono::Duration::days(1);
    }
    date
}
