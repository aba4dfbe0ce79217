pub mod postgres_appointment_repo;
pub mod postgres_business_repo;
pub mod postgres_service_repo;
pub mod sqlite_appointment_repo;
pub mod sqlite_business_repo;
pub mod sqlite_service_repo;
