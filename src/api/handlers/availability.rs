use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dtos::responses::SlotsResponse;
use crate::domain::models::{business::Business, service::Service};
use crate::domain::services::availability::{available_slots, candidate_slots};
use crate::error::AppError;
use crate::state::AppState;

const MAX_RANGE_DAYS: i64 = 62;

async fn bookable_service(
    state: &AppState,
    slug: &str,
    service_id: &str,
) -> Result<(Business, Service), AppError> {
    let business = state.business_repo.find_by_slug(slug).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;

    let service = state.service_repo.find_by_id(service_id).await?
        .filter(|s| s.business_id == business.id && s.is_active)
        .ok_or(AppError::NotFound("Service not found for this business".into()))?;

    Ok((business, service))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path((slug, service_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let (business, service) = bookable_service(&state, &slug, &service_id).await?;

    let date_str = params.get("date").ok_or(AppError::Validation("date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    if date < Utc::now().naive_utc().date() {
        return Err(AppError::Validation("Date is in the past".into()));
    }

    let candidates = candidate_slots(&business.schedule(), date.weekday(), service.duration_min);

    let day_start = date.and_hms_opt(0, 0, 0).unwrap();
    let day_end = day_start + Duration::days(1);
    let existing = state
        .appointment_repo
        .list_confirmed_in_range(&business.id, day_start, day_end)
        .await?;

    let free = available_slots(&candidates, service.duration_min, date, &existing);

    Ok(Json(SlotsResponse {
        date: date_str.to_string(),
        slots: free.iter().map(|t| t.format("%H:%M").to_string()).collect(),
    }))
}

pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    Path((slug, service_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let (business, service) = bookable_service(&state, &slug, &service_id).await?;

    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;

    let start_date = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end_date = NaiveDate::parse_from_str(end_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end".into()))?;

    if end_date < start_date {
        return Err(AppError::Validation("End date must not be before start date".into()));
    }
    if (end_date - start_date).num_days() > MAX_RANGE_DAYS {
        return Err(AppError::Validation("Date range too large".into()));
    }

    let range_start = start_date.and_hms_opt(0, 0, 0).unwrap();
    let range_end = end_date.and_hms_opt(0, 0, 0).unwrap() + Duration::days(1);
    let all_appointments = state
        .appointment_repo
        .list_confirmed_in_range(&business.id, range_start, range_end)
        .await?;

    let schedule = business.schedule();
    let today = Utc::now().naive_utc().date();

    let mut available_dates = Vec::new();
    let mut current_date = start_date;

    while current_date <= end_date {
        if current_date >= today {
            let day_start = current_date.and_hms_opt(0, 0, 0).unwrap();
            let day_end = day_start + Duration::days(1);

            let day_appointments: Vec<_> = all_appointments
                .iter()
                .filter(|a| a.start_time < day_end && a.end_time > day_start)
                .cloned()
                .collect();

            let candidates = candidate_slots(&schedule, current_date.weekday(), service.duration_min);
            let free = available_slots(&candidates, service.duration_min, current_date, &day_appointments);
            if !free.is_empty() {
                available_dates.push(current_date.to_string());
            }
        }
        current_date += Duration::days(1);
    }

    Ok(Json(available_dates))
}
