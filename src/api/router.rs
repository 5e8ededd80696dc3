use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, booking, health, index, room, teacher, timetable};
use tower_http::{
    classify::ServerErrorsFailureClass,
    services::ServeDir,
    trace::TraceLayer,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Session
        .route("/", get(index::index))
        .route("/ajax/login", post(auth::login))
        .route("/logout", get(auth::logout))

        // Read-only pages
        .route("/rooms", get(room::list_rooms))
        .route("/teachers", get(teacher::list_teachers))
        .route("/timetable", get(timetable::room_picker))
        .route("/timetable/{room}", get(timetable::current_week))
        .route("/timetable/{room}/{week}", get(timetable::other_week))
        .route("/booking", get(booking::list_bookings))
        .route("/booking/{id}", get(booking::get_booking))
        .route("/about", get(index::about))

        // Admin forms
        .route("/add/room", get(room::add_room_page))
        .route("/remove/room", get(room::remove_room_page))
        .route("/add/teacher", get(teacher::add_teacher_page))
        .route("/remove/teacher", get(teacher::remove_teacher_page))
        .route("/edit/teacher/{id}", get(teacher::edit_teacher_page))
        .route("/add/booking", get(booking::add_booking_page))
        .route("/add/booking/{room}", get(booking::add_booking_for_room_page))
        .route("/edit/booking/{id}", get(booking::edit_booking_page))

        // Admin writes
        .route("/ajax/add/room", post(room::add_room))
        .route("/ajax/remove/room", post(room::remove_room))
        .route("/ajax/add/teacher", post(teacher::add_teacher))
        .route("/ajax/remove/teacher", post(teacher::remove_teacher))
        .route("/ajax/edit/teacher", post(teacher::edit_teacher))
        .route("/ajax/add/booking", post(booking::add_booking))
        .route("/ajax/edit/booking", post(booking::edit_booking))
        .route("/ajax/remove/booking", post(booking::remove_booking))

        .nest_service("/static", ServeDir::new("static"))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        user = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
