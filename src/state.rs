use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, BusinessRepository, NotificationService, ServiceRepository,
};
use crate::domain::services::booking::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub business_repo: Arc<dyn BusinessRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub booking_service: Arc<BookingService>,
    pub notifier: Arc<dyn NotificationService>,
}
