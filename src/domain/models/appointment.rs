use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::models::identity::Identity;
use crate::domain::models::service::Service;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    CancelledByClient,
    CancelledByBusiness,
}

#[derive(Debug, Clone, Copy)]
pub enum CancelledBy {
    Client,
    Business,
}

/// A reserved time slot. Service name, price and duration are copied at
/// booking time; later catalog edits never touch existing appointments.
/// `start_time`/`end_time` are business-local wall-clock values.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: String,
    pub business_id: String,
    pub service_id: String,
    pub service_name: String,
    pub service_price_cents: i64,
    pub duration_min: i32,
    pub client_id: String,
    pub client_name: String,
    pub client_email: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(business_id: &str, service: &Service, client: &Identity, start: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            business_id: business_id.to_string(),
            service_id: service.id.clone(),
            service_name: service.name.clone(),
            service_price_cents: service.price_cents,
            duration_min: service.duration_min,
            client_id: client.user_id.clone(),
            client_name: client.display_name.clone(),
            client_email: client.email.clone(),
            start_time: start,
            end_time: start + Duration::minutes(service.duration_min as i64),
            status: AppointmentStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    /// Cancellation is the only transition out of `confirmed`, and the
    /// cancelled states are terminal. Past appointments stay untouched for
    /// history.
    pub fn cancel(&mut self, by: CancelledBy, now: NaiveDateTime) -> Result<(), AppError> {
        if self.status != AppointmentStatus::Confirmed {
            return Err(AppError::Validation("Appointment is already cancelled".into()));
        }
        if self.start_time <= now {
            return Err(AppError::Validation("Past appointments cannot be cancelled".into()));
        }
        self.status = match by {
            CancelledBy::Client => AppointmentStatus::CancelledByClient,
            CancelledBy::Business => AppointmentStatus::CancelledByBusiness,
        };
        Ok(())
    }
}
