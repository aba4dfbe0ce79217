use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::RegisterBusinessRequest;
use crate::api::extractors::identity::CurrentUser;
use crate::domain::models::business::{slugify, Business, WeeklySchedule};
use crate::domain::models::identity::{Identity, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the business owned by the caller. Every owner-facing route
/// goes through this; ownership is the only authorization the service has.
pub async fn owned_business(state: &AppState, identity: &Identity) -> Result<Business, AppError> {
    if identity.role != Role::BusinessOwner {
        return Err(AppError::Forbidden("Business owner role required".into()));
    }
    state
        .business_repo
        .find_by_owner(&identity.user_id)
        .await?
        .ok_or(AppError::NotFound("No business registered for this account".into()))
}

async fn unique_slug(state: &AppState, name: &str) -> Result<String, AppError> {
    let base = slugify(name);
    if base.is_empty() {
        return Err(AppError::Validation("Business name must contain letters or digits".into()));
    }

    let mut candidate = base.clone();
    let mut counter = 2;
    while state.business_repo.slug_exists(&candidate).await? {
        candidate = format!("{}-{}", base, counter);
        counter += 1;
    }
    Ok(candidate)
}

pub async fn register_business(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<RegisterBusinessRequest>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::BusinessOwner {
        return Err(AppError::Forbidden("Only business owners can register a business".into()));
    }
    if state.business_repo.find_by_owner(&user.user_id).await?.is_some() {
        return Err(AppError::Conflict("A business is already registered for this account".into()));
    }

    let slug = unique_slug(&state, &payload.name).await?;
    let schedule_json =
        serde_json::to_string(&WeeklySchedule::default()).map_err(|_| AppError::Internal)?;

    let business = Business::new(user.user_id.clone(), payload.name, slug, schedule_json);
    let created = state.business_repo.create(&business).await?;

    info!("Business registered: {} ({})", created.slug, created.id);
    Ok(Json(created))
}

pub async fn get_business_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = state.business_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;

    Ok(Json(business))
}

pub async fn get_my_business(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;
    Ok(Json(business))
}

pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(schedule): Json<WeeklySchedule>,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;

    schedule.validate().map_err(AppError::Validation)?;

    let schedule_json = serde_json::to_string(&schedule).map_err(|_| AppError::Internal)?;
    let updated = state.business_repo.update_schedule(&business.id, &schedule_json).await?;

    info!("Working hours updated for business {}", business.id);
    Ok(Json(updated))
}
