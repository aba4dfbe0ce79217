use crate::domain::{
    models::appointment::{Appointment, AppointmentStatus},
    ports::AppointmentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Row, SqlitePool};

pub struct SqliteAppointmentRepo {
    pool: SqlitePool,
}

impl SqliteAppointmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepo {
    async fn insert_if_free(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Overlap check and insert commit as one unit; SQLite serializes
        // writers, so two overlapping inserts cannot both pass the check.
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM appointments
             WHERE business_id = ? AND status = 'confirmed' AND start_time < ? AND end_time > ?"
        )
            .bind(&appointment.business_id).bind(appointment.end_time).bind(appointment.start_time)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        if row.get::<i64, _>("count") > 0 {
            return Err(AppError::Conflict(
                "That time was just taken, please pick another slot".to_string(),
            ));
        }

        let created = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, business_id, service_id, service_name, service_price_cents, duration_min, client_id, client_name, client_email, start_time, end_time, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&appointment.id).bind(&appointment.business_id).bind(&appointment.service_id)
            .bind(&appointment.service_name).bind(appointment.service_price_cents).bind(appointment.duration_min)
            .bind(&appointment.client_id).bind(&appointment.client_name).bind(&appointment.client_email)
            .bind(appointment.start_time).bind(appointment.end_time).bind(appointment.status)
            .bind(appointment.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_confirmed_in_range(
        &self,
        business_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments
             WHERE business_id = ? AND status = 'confirmed' AND start_time < ? AND end_time > ?
             ORDER BY start_time ASC"
        )
            .bind(business_id).bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE business_id = ? ORDER BY start_time ASC"
        )
            .bind(business_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_client(&self, client_id: &str) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE client_id = ? ORDER BY start_time DESC"
        )
            .bind(client_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_cancelled(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = ? WHERE id = ? AND status = 'confirmed' RETURNING *"
        )
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
