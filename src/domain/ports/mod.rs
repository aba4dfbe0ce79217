use crate::domain::models::{
    appointment::{Appointment, AppointmentStatus},
    business::Business,
    notification::BookingConfirmation,
    service::Service,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn create(&self, business: &Business) -> Result<Business, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Business>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError>;
    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<Business>, AppError>;
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;
    async fn update_schedule(&self, id: &str, schedule_json: &str) -> Result<Business, AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError>;
    async fn list_by_business(&self, business_id: &str, active_only: bool) -> Result<Vec<Service>, AppError>;
    async fn update(&self, service: &Service) -> Result<Service, AppError>;
    async fn deactivate(&self, business_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Atomic conditional insert: commits the appointment only if no
    /// confirmed appointment of the same business overlaps its interval,
    /// otherwise fails with `Conflict` and writes nothing.
    async fn insert_if_free(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError>;
    async fn list_confirmed_in_range(
        &self,
        business_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_client(&self, client_id: &str) -> Result<Vec<Appointment>, AppError>;
    /// Conditional status update, applied only while still `confirmed`.
    /// Returns `None` when the appointment was no longer cancellable.
    async fn mark_cancelled(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppError>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send_confirmation(&self, confirmation: &BookingConfirmation) -> Result<(), AppError>;
}
