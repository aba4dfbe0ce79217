use serde::Serialize;

use crate::domain::models::appointment::Appointment;
use crate::domain::models::business::Business;

/// Payload for the confirmation dispatch after a successful booking.
/// Dispatch is fire-and-forget; a failure never rolls the booking back.
#[derive(Debug, Serialize, Clone)]
pub struct BookingConfirmation {
    pub client_name: String,
    pub client_email: String,
    pub service_name: String,
    pub business_name: String,
    pub date: String,
    pub time: String,
}

impl BookingConfirmation {
    pub fn new(business: &Business, appointment: &Appointment) -> Self {
        Self {
            client_name: appointment.client_name.clone(),
            client_email: appointment.client_email.clone(),
            service_name: appointment.service_name.clone(),
            business_name: business.name.clone(),
            date: appointment.start_time.format("%B %-d, %Y").to_string(),
            time: appointment.start_time.format("%H:%M").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::identity::{Identity, Role};
    use crate::domain::models::service::Service;
    use chrono::NaiveDate;

    #[test]
    fn test_confirmation_formats_date_and_time() {
        let business = Business::new(
            "owner-1".to_string(),
            "Studio Glow".to_string(),
            "studio-glow".to_string(),
            "{}".to_string(),
        );
        let service = Service::new(
            business.id.clone(),
            "Massage".to_string(),
            "Relaxing".to_string(),
            30,
            8000,
        );
        let client = Identity {
            user_id: "client-1".to_string(),
            display_name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            role: Role::Client,
        };
        let start = NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();

        let note = BookingConfirmation::new(&business, &Appointment::new(&business.id, &service, &client, start));
        assert_eq!(note.business_name, "Studio Glow");
        assert_eq!(note.date, "March 3, 2025");
        assert_eq!(note.time, "14:30");
    }
}
