use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions};
use sqlx::{SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_room_repo::SqliteRoomRepo,
    sqlite_teacher_repo::SqliteTeacherRepo,
};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("rooms.html", include_str!("../../templates/rooms.html")),
    ("teachers.html", include_str!("../../templates/teachers.html")),
    ("timetable.html", include_str!("../../templates/timetable.html")),
    ("booking.html", include_str!("../../templates/booking.html")),
    ("add_room.html", include_str!("../../templates/add_room.html")),
    ("remove_room.html", include_str!("../../templates/remove_room.html")),
    ("add_teacher.html", include_str!("../../templates/add_teacher.html")),
    ("edit_teacher.html", include_str!("../../templates/edit_teacher.html")),
    ("remove_teacher.html", include_str!("../../templates/remove_teacher.html")),
    ("booking_form.html", include_str!("../../templates/booking_form.html")),
    ("bookings.html", include_str!("../../templates/bookings.html")),
    ("about.html", include_str!("../../templates/about.html")),
];

/// Page templates are compiled into the binary.
pub fn load_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, AppError> {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    run_sqlite_migrations(&pool).await?;
    Ok(pool)
}

pub fn build_state(config: &Config, pool: SqlitePool, templates: Tera) -> AppState {
    AppState::new(
        config.clone(),
        Arc::new(SqliteRoomRepo::new(pool.clone())),
        Arc::new(SqliteTeacherRepo::new(pool.clone())),
        Arc::new(SqliteBookingRepo::new(pool)),
        templates,
    )
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let pool = connect_sqlite(&config.database_url).await?;
    let templates = load_templates()?;
    Ok(build_state(config, pool, templates))
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}
