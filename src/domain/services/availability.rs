use chrono::{Duration, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::domain::models::appointment::{Appointment, AppointmentStatus};
use crate::domain::models::business::WeeklySchedule;

/// Candidate start times for one weekday: successive steps of the service
/// duration from opening time, keeping only slots that end at or before
/// closing time. Inactive or unparseable days yield nothing.
pub fn candidate_slots(schedule: &WeeklySchedule, weekday: Weekday, duration_min: i32) -> Vec<NaiveTime> {
    if duration_min <= 0 {
        return Vec::new();
    }

    let hours = schedule.for_weekday(weekday);
    if !hours.active {
        return Vec::new();
    }

    let mut slots = Vec::new();

    if let (Ok(start), Ok(end)) = (
        NaiveTime::parse_from_str(&hours.start_time, "%H:%M"),
        NaiveTime::parse_from_str(&hours.end_time, "%H:%M"),
    ) {
        let start_min = start.hour() * 60 + start.minute();
        let end_min = end.hour() * 60 + end.minute();
        let step = duration_min as u32;

        let mut cursor = start_min;
        while cursor + step <= end_min {
            if let Some(slot) = NaiveTime::from_hms_opt(cursor / 60, cursor % 60, 0) {
                slots.push(slot);
            }
            cursor += step;
        }
    }

    slots
}

/// Filters candidates against the confirmed appointments of the day using
/// interval overlap: a slot `[s, s+d)` is occupied when `s < appt_end` and
/// `appt_start < s+d`. An occupying appointment of a different duration may
/// straddle several candidates, so start-time equality is not enough.
pub fn available_slots(
    candidates: &[NaiveTime],
    duration_min: i32,
    date: NaiveDate,
    existing: &[Appointment],
) -> Vec<NaiveTime> {
    let duration = Duration::minutes(duration_min as i64);

    candidates
        .iter()
        .copied()
        .filter(|slot| {
            let slot_start = date.and_time(*slot);
            let slot_end = slot_start + duration;
            !existing.iter().any(|appt| {
                appt.status == AppointmentStatus::Confirmed
                    && appt.start_time < slot_end
                    && slot_start < appt.end_time
            })
        })
        .collect()
}
