use crate::domain::{models::service::Service, ports::ServiceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteServiceRepo {
    pool: SqlitePool,
}

impl SqliteServiceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, business_id, name, description, duration_min, price_cents, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&service.id).bind(&service.business_id).bind(&service.name).bind(&service.description)
            .bind(service.duration_min).bind(service.price_cents).bind(service.is_active).bind(service.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_business(&self, business_id: &str, active_only: bool) -> Result<Vec<Service>, AppError> {
        let query = if active_only {
            "SELECT * FROM services WHERE business_id = ? AND is_active = 1 ORDER BY created_at DESC"
        } else {
            "SELECT * FROM services WHERE business_id = ? ORDER BY created_at DESC"
        };
        sqlx::query_as::<_, Service>(query)
            .bind(business_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET name = ?, description = ?, duration_min = ?, price_cents = ?, is_active = ?
             WHERE id = ? AND business_id = ?
             RETURNING *"
        )
            .bind(&service.name).bind(&service.description).bind(service.duration_min)
            .bind(service.price_cents).bind(service.is_active)
            .bind(&service.id).bind(&service.business_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn deactivate(&self, business_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE services SET is_active = 0 WHERE id = ? AND business_id = ?")
            .bind(id).bind(business_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Service not found".into()));
        }
        Ok(())
    }
}
