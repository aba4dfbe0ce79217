use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, Duration, NaiveDateTime, Utc};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use crate::domain::models::{
    appointment::Appointment, business::Business, identity::Identity, service::Service,
};
use crate::domain::ports::AppointmentRepository;
use crate::domain::services::availability::{available_slots, candidate_slots};
use crate::error::AppError;

/// Commits bookings while upholding the per-business no-overlap invariant.
///
/// The slot list a client saw can be stale by the time they submit, so the
/// requested interval is re-validated at commit time under a per-business
/// async mutex. The repository's conditional insert re-checks once more
/// inside the store transaction, which also covers multi-process
/// deployments. Bookings for different businesses never contend.
pub struct BookingService {
    appointments: Arc<dyn AppointmentRepository>,
    business_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl BookingService {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self {
            appointments,
            business_locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, business_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.business_locks.lock().expect("business lock registry poisoned");
        locks
            .entry(business_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    pub async fn book(
        &self,
        business: &Business,
        service: &Service,
        client: &Identity,
        start: NaiveDateTime,
    ) -> Result<Appointment, AppError> {
        if service.duration_min <= 0 {
            return Err(AppError::Validation("Service duration must be positive".into()));
        }

        let now = Utc::now().naive_utc();
        if start <= now {
            return Err(AppError::Validation("Cannot book a time in the past".into()));
        }

        let date = start.date();
        let schedule = business.schedule();
        let candidates = candidate_slots(&schedule, date.weekday(), service.duration_min);
        if !candidates.contains(&start.time()) {
            return Err(AppError::Validation(
                "Requested time is outside the business's working hours".into(),
            ));
        }

        let lock = self.lock_for(&business.id);
        let _guard = lock.lock().await;

        // Revalidate against the current confirmed set; the availability the
        // client selected from may be stale.
        let day_start = date.and_hms_opt(0, 0, 0).unwrap();
        let day_end = day_start + Duration::days(1);
        let existing = self
            .appointments
            .list_confirmed_in_range(&business.id, day_start, day_end)
            .await?;

        let requested = [start.time()];
        if available_slots(&requested, service.duration_min, date, &existing).is_empty() {
            warn!(
                "Booking rejected: slot {} already taken for business {}",
                start, business.id
            );
            return Err(AppError::Conflict(
                "That time was just taken, please pick another slot".into(),
            ));
        }

        let appointment = Appointment::new(&business.id, service, client, start);
        let created = self.appointments.insert_if_free(&appointment).await?;

        info!(
            "Appointment confirmed: {} ({} at {})",
            created.id, created.service_name, created.start_time
        );
        Ok(created)
    }
}
