use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayHours {
    pub active: bool,
    pub start_time: String,
    pub end_time: String,
}

impl DayHours {
    fn new(active: bool, start_time: &str, end_time: &str) -> Self {
        Self {
            active,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

/// Recurring opening hours, one entry per weekday. Times are business-local
/// "HH:MM" strings; inactive days keep their last configured times.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WeeklySchedule {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            monday: DayHours::new(true, "09:00", "18:00"),
            tuesday: DayHours::new(true, "09:00", "18:00"),
            wednesday: DayHours::new(true, "09:00", "18:00"),
            thursday: DayHours::new(true, "09:00", "18:00"),
            friday: DayHours::new(true, "09:00", "18:00"),
            saturday: DayHours::new(false, "10:00", "14:00"),
            sunday: DayHours::new(false, "09:00", "18:00"),
        }
    }
}

impl WeeklySchedule {
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// Every active day must carry parseable times and open before it closes.
    pub fn validate(&self) -> Result<(), String> {
        let days = [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ];

        for (name, hours) in days {
            if !hours.active {
                continue;
            }
            let start = NaiveTime::parse_from_str(&hours.start_time, "%H:%M")
                .map_err(|_| format!("{}: invalid start time '{}'", name, hours.start_time))?;
            let end = NaiveTime::parse_from_str(&hours.end_time, "%H:%M")
                .map_err(|_| format!("{}: invalid end time '{}'", name, hours.end_time))?;
            if start >= end {
                return Err(format!("{}: opening time must be before closing time", name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Business {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub slug: String,
    pub schedule_json: String,
    pub created_at: DateTime<Utc>,
}

impl Business {
    pub fn new(owner_id: String, name: String, slug: String, schedule_json: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name,
            slug,
            schedule_json,
            created_at: Utc::now(),
        }
    }

    pub fn schedule(&self) -> WeeklySchedule {
        serde_json::from_str(&self.schedule_json).unwrap_or_default()
    }
}

/// Lowercased, dash-separated, URL-safe form of a business name.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Studio Glow"), "studio-glow");
        assert_eq!(slugify("  Bella's Hair & Nails  "), "bella-s-hair-nails");
        assert_eq!(slugify("UPPER"), "upper");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_default_schedule_matches_registration_defaults() {
        let schedule = WeeklySchedule::default();
        assert!(schedule.monday.active);
        assert_eq!(schedule.monday.start_time, "09:00");
        assert_eq!(schedule.friday.end_time, "18:00");
        assert!(!schedule.saturday.active);
        assert!(!schedule.sunday.active);
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_hours() {
        let mut schedule = WeeklySchedule::default();
        schedule.tuesday.start_time = "18:00".to_string();
        schedule.tuesday.end_time = "09:00".to_string();
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_inactive_days() {
        let mut schedule = WeeklySchedule::default();
        schedule.sunday.start_time = "bogus".to_string();
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_schedule_roundtrips_through_json_column() {
        let business = Business::new(
            "user-1".to_string(),
            "Studio Glow".to_string(),
            "studio-glow".to_string(),
            serde_json::to_string(&WeeklySchedule::default()).unwrap(),
        );
        let schedule = business.schedule();
        assert!(schedule.wednesday.active);
        assert_eq!(schedule.saturday.start_time, "10:00");
    }
}
