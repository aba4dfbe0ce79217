use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{appointment, availability, business, health, service};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public business profile & catalog
        .route("/api/v1/businesses", post(business::register_business))
        .route("/api/v1/businesses/{slug}", get(business::get_business_by_slug))
        .route("/api/v1/businesses/{slug}/services", get(service::list_public_services))

        // Public booking flow
        .route("/api/v1/businesses/{slug}/services/{service_id}/slots", get(availability::get_slots))
        .route("/api/v1/businesses/{slug}/services/{service_id}/dates", get(availability::get_available_dates))
        .route("/api/v1/businesses/{slug}/services/{service_id}/book", post(appointment::book_slot))

        // Owner administration
        .route("/api/v1/my-business", get(business::get_my_business))
        .route("/api/v1/my-business/schedule", put(business::update_schedule))
        .route("/api/v1/my-business/services", get(service::list_my_services).post(service::create_service))
        .route("/api/v1/my-business/services/{service_id}", put(service::update_service).delete(service::delete_service))
        .route("/api/v1/my-business/appointments", get(appointment::list_business_appointments))
        .route("/api/v1/my-business/appointments/{appointment_id}/cancel", post(appointment::cancel_business_appointment))

        // Client booking history
        .route("/api/v1/my-appointments", get(appointment::list_my_appointments))
        .route("/api/v1/my-appointments/{appointment_id}/cancel", post(appointment::cancel_my_appointment))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
