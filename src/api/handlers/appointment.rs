use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::BookSlotRequest;
use crate::api::dtos::responses::ClientAppointmentView;
use crate::api::extractors::identity::CurrentUser;
use crate::api::handlers::business::owned_business;
use crate::domain::models::appointment::CancelledBy;
use crate::domain::models::notification::BookingConfirmation;
use crate::error::AppError;
use crate::state::AppState;

pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((slug, service_id)): Path<(String, String)>,
    Json(payload): Json<BookSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = state.business_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;

    let service = state.service_repo.find_by_id(&service_id).await?
        .filter(|s| s.business_id == business.id && s.is_active)
        .ok_or(AppError::NotFound("Service not found for this business".into()))?;

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let time = NaiveTime::parse_from_str(&payload.time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    let created = state
        .booking_service
        .book(&business, &service, &user, date.and_time(time))
        .await?;

    // Confirmation is fire-and-forget; the booking stands even if dispatch
    // fails.
    let confirmation = BookingConfirmation::new(&business, &created);
    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.send_confirmation(&confirmation).await {
            warn!("Confirmation dispatch failed: {}", e);
        }
    });

    Ok(Json(created))
}

pub async fn list_business_appointments(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;
    let appointments = state.appointment_repo.list_by_business(&business.id).await?;
    Ok(Json(appointments))
}

pub async fn list_my_appointments(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let appointments = state.appointment_repo.list_by_client(&user.user_id).await?;

    let mut business_names: HashMap<String, String> = HashMap::new();
    let mut entries = Vec::with_capacity(appointments.len());

    for appointment in appointments {
        if !business_names.contains_key(&appointment.business_id) {
            let name = state
                .business_repo
                .find_by_id(&appointment.business_id)
                .await?
                .map(|b| b.name)
                .unwrap_or_else(|| "Unknown business".to_string());
            business_names.insert(appointment.business_id.clone(), name);
        }

        let business_name = business_names[&appointment.business_id].clone();
        entries.push(ClientAppointmentView {
            appointment,
            business_name,
        });
    }

    Ok(Json(entries))
}

pub async fn cancel_my_appointment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(appointment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut appointment = state.appointment_repo.find_by_id(&appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    if appointment.client_id != user.user_id {
        return Err(AppError::Forbidden("You cannot cancel this appointment".into()));
    }

    appointment.cancel(CancelledBy::Client, Utc::now().naive_utc())?;

    let saved = state
        .appointment_repo
        .mark_cancelled(&appointment.id, appointment.status)
        .await?
        .ok_or(AppError::Validation("Appointment is already cancelled".into()))?;

    info!("Appointment cancelled by client: {}", saved.id);
    Ok(Json(saved))
}

pub async fn cancel_business_appointment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(appointment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = owned_business(&state, &user).await?;

    let mut appointment = state.appointment_repo.find_by_id(&appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    if appointment.business_id != business.id {
        return Err(AppError::Forbidden("Appointment belongs to another business".into()));
    }

    appointment.cancel(CancelledBy::Business, Utc::now().naive_utc())?;

    let saved = state
        .appointment_repo
        .mark_cancelled(&appointment.id, appointment.status)
        .await?
        .ok_or(AppError::Validation("Appointment is already cancelled".into()))?;

    info!("Appointment cancelled by business: {}", saved.id);
    Ok(Json(saved))
}
