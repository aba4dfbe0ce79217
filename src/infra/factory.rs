use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::PgPoolOptions, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool};
use tracing::info;

use crate::config::Config;
use crate::domain::services::booking::BookingService;
use crate::infra::notify::http_notifier::HttpNotifier;
use crate::infra::repositories::{
    postgres_appointment_repo::PostgresAppointmentRepo, postgres_business_repo::PostgresBusinessRepo,
    postgres_service_repo::PostgresServiceRepo,
    sqlite_appointment_repo::SqliteAppointmentRepo, sqlite_business_repo::SqliteBusinessRepo,
    sqlite_service_repo::SqliteServiceRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let notifier = Arc::new(HttpNotifier::new(
        config.notify_service_url.clone(),
        config.notify_service_token.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let appointment_repo = Arc::new(PostgresAppointmentRepo::new(pool.clone()));
        let booking_service = Arc::new(BookingService::new(appointment_repo.clone()));

        AppState {
            config: config.clone(),
            business_repo: Arc::new(PostgresBusinessRepo::new(pool.clone())),
            service_repo: Arc::new(PostgresServiceRepo::new(pool.clone())),
            appointment_repo,
            booking_service,
            notifier,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let appointment_repo = Arc::new(SqliteAppointmentRepo::new(pool.clone()));
        let booking_service = Arc::new(BookingService::new(appointment_repo.clone()));

        AppState {
            config: config.clone(),
            business_repo: Arc::new(SqliteBusinessRepo::new(pool.clone())),
            service_repo: Arc::new(SqliteServiceRepo::new(pool.clone())),
            appointment_repo,
            booking_service,
            notifier,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
