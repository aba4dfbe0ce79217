use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterBusinessRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    pub duration_min: i32,
    pub price_cents: i64,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_min: Option<i32>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct BookSlotRequest {
    pub date: String,
    pub time: String,
}
