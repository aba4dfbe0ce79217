use serde::Serialize;

use crate::domain::models::appointment::Appointment;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<String>,
}

/// Client-facing appointment entry, carrying the business display name the
/// way the booking history screen shows it.
#[derive(Serialize)]
pub struct ClientAppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub business_name: String,
}
