use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub description: String,
    pub duration_min: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(
        business_id: String,
        name: String,
        description: String,
        duration_min: i32,
        price_cents: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            business_id,
            name,
            description,
            duration_min,
            price_cents,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
