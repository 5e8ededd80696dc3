use std::sync::Arc;
use crate::domain::ports::{BookingRepository, RoomRepository, TeacherRepository};
use crate::domain::services::{
    auth_service::AuthService, booking_service::BookingService, roster_service::RosterService,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub room_repo: Arc<dyn RoomRepository>,
    pub teacher_repo: Arc<dyn TeacherRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
    pub roster_service: Arc<RosterService>,
    pub auth_service: Arc<AuthService>,
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Wires the services on top of the given repositories.
    pub fn new(
        config: Config,
        room_repo: Arc<dyn RoomRepository>,
        teacher_repo: Arc<dyn TeacherRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        templates: Tera,
    ) -> Self {
        let booking_service = Arc::new(BookingService::new(
            room_repo.clone(),
            teacher_repo.clone(),
            booking_repo.clone(),
            config.timezone,
            config.lessons_per_day,
        ));
        let roster_service = Arc::new(RosterService::new(room_repo.clone(), teacher_repo.clone()));
        let auth_service = Arc::new(AuthService::new(&config));

        Self {
            config,
            room_repo,
            teacher_repo,
            booking_repo,
            booking_service,
            roster_service,
            auth_service,
            templates: Arc::new(templates),
        }
    }
}
