use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateServiceRequest, UpdateServiceRequest};
use crate::api::extractors::identity::CurrentUser;
use crate::api::handlers::business::owned_business;
use crate::domain::models::service::Service;
use crate::error::AppError;
use crate::state::AppState;

fn validate_duration(duration_min: i32) -> Result<(), AppError> {
    if duration_min <= 0 {
        return Err(AppError::Validation("Service duration must be positive".into()));
    }
    Ok(())
}

fn validate_price(price_cents: i64) -> Result<(), AppError> {
    if price_cents < 0 {
        return Err(AppError::Validation("Service price cannot be negative".into()));
    }
    Ok(())
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Service name is required".into()));
    }
    validate_duration(payload.duration_min)?;
    validate_price(payload.price_cents)?;

    let service = Service::new(
        business.id.clone(),
        payload.name,
        payload.description,
        payload.duration_min,
        payload.price_cents,
    );
    let created = state.service_repo.create(&service).await?;

    info!("Service created: {} for business {}", created.id, business.id);
    Ok(Json(created))
}

pub async fn list_my_services(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;
    let services = state.service_repo.list_by_business(&business.id, false).await?;
    Ok(Json(services))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(service_id): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;

    let mut service = state.service_repo.find_by_id(&service_id).await?
        .filter(|s| s.business_id == business.id)
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Service name is required".into()));
        }
        service.name = name;
    }
    if let Some(description) = payload.description {
        service.description = description;
    }
    if let Some(duration_min) = payload.duration_min {
        validate_duration(duration_min)?;
        service.duration_min = duration_min;
    }
    if let Some(price_cents) = payload.price_cents {
        validate_price(price_cents)?;
        service.price_cents = price_cents;
    }
    if let Some(is_active) = payload.is_active {
        service.is_active = is_active;
    }

    let updated = state.service_repo.update(&service).await?;
    info!("Service updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(service_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;

    state.service_repo.deactivate(&business.id, &service_id).await?;

    info!("Service deactivated: {}", service_id);
    Ok(Json(serde_json::json!({"status": "deactivated"})))
}

pub async fn list_public_services(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = state.business_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;

    let services = state.service_repo.list_by_business(&business.id, true).await?;
    Ok(Json(services))
}
