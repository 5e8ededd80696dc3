mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn in_days(days: i64) -> String {
    (today() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

async fn setup(app: &TestApp, capacity: i64) -> (AuthHeaders, i64, i64) {
    let auth = app.admin().await;
    let room = app.add_room(&auth, "Lab 1", capacity).await;
    let teacher = app.add_teacher(&auth, "Dr", "Grace", "Hopper").await;
    (auth, room, teacher)
}

async fn book(app: &TestApp, auth: &AuthHeaders, body: Value) -> Value {
    app.post_json("/ajax/add/booking", Some(auth), body).await.1
}

#[tokio::test]
async fn test_create_booking() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;

    let body = book(&app, &auth, json!({
        "teacher": teacher, "size": 25, "room": room, "date": in_days(7), "lesson": 2
    })).await;

    assert_eq!(body["success"], 1, "{}", body);
    assert_eq!(body["error"], "");
    assert_eq!(body["roomID"], room);

    let booking_id = body["bookID"].as_i64().unwrap();
    let stored = app.state.booking_repo.find_by_id(booking_id).await.unwrap().unwrap();
    assert_eq!(stored.room_id, room);
    assert_eq!(stored.teacher_id, teacher);
    assert_eq!(stored.size, 25);
    assert_eq!(stored.lesson, 2);
    assert_eq!(stored.date, today() + Duration::days(7));
}

#[tokio::test]
async fn test_form_values_may_be_strings() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;

    let body = book(&app, &auth, json!({
        "teacher": teacher.to_string(), "size": "12", "room": room.to_string(),
        "date": in_days(3), "lesson": "1"
    })).await;
    assert_eq!(body["success"], 1, "{}", body);
}

#[tokio::test]
async fn test_slot_can_only_be_booked_once() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;
    let other_teacher = app.add_teacher(&auth, "Mr", "Alan", "Turing").await;
    let other_room = app.add_room(&auth, "Lab 2", 30).await;
    let date = in_days(5);

    let first = book(&app, &auth, json!({
        "teacher": teacher, "size": 10, "room": room, "date": date, "lesson": 4
    })).await;
    assert_eq!(first["success"], 1);

    let clash = book(&app, &auth, json!({
        "teacher": other_teacher, "size": 5, "room": room, "date": date, "lesson": 4
    })).await;
    assert_eq!(clash["success"], 0);
    assert_eq!(clash["error"], "A booking already exists there");

    let next_lesson = book(&app, &auth, json!({
        "teacher": other_teacher, "size": 5, "room": room, "date": date, "lesson": 5
    })).await;
    assert_eq!(next_lesson["success"], 1);

    let other = book(&app, &auth, json!({
        "teacher": other_teacher, "size": 5, "room": other_room, "date": date, "lesson": 4
    })).await;
    assert_eq!(other["success"], 1);

    let bookings = app.state.booking_repo.list_all().await.unwrap();
    assert_eq!(bookings.len(), 3);
}

#[tokio::test]
async fn test_rejections() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 10).await;

    let cases = [
        (json!({ "teacher": teacher, "size": 20, "room": room, "date": in_days(2), "lesson": 1 }),
            "Class too big for room"),
        (json!({ "teacher": teacher, "size": 5, "room": room, "date": in_days(-1), "lesson": 1 }),
            "Can't book sessions that have already been"),
        (json!({ "teacher": teacher, "size": 5, "room": 9999, "date": in_days(2), "lesson": 1 }),
            "Invalid room"),
        (json!({ "teacher": 9999, "size": 5, "room": room, "date": in_days(2), "lesson": 1 }),
            "Invalid teacher"),
        (json!({ "teacher": teacher, "size": 0, "room": room, "date": in_days(2), "lesson": 1 }),
            "Class size has to be between 1 and 100"),
        (json!({ "teacher": teacher, "size": 5, "room": room, "date": "31/12/2099", "lesson": 1 }),
            "Invalid date"),
        (json!({ "teacher": teacher, "size": 5, "room": room, "date": in_days(2), "lesson": 9 }),
            "Invalid lesson"),
        (json!({ "teacher": teacher, "size": 5, "room": room, "date": in_days(2) }),
            "Please check you have filled in all the information"),
        (json!({ "teacher": teacher, "size": "", "room": room, "date": in_days(2), "lesson": 1 }),
            "Please check you have filled in all the information"),
    ];

    for (payload, expected) in cases {
        let body = book(&app, &auth, payload.clone()).await;
        assert_eq!(body["success"], 0, "{}", payload);
        assert_eq!(body["error"], expected, "{}", payload);
    }

    assert!(app.state.booking_repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_today_can_be_booked() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;

    let body = book(&app, &auth, json!({
        "teacher": teacher, "size": 5, "room": room, "date": in_days(0), "lesson": 6
    })).await;
    assert_eq!(body["success"], 1, "{}", body);
}

#[tokio::test]
async fn test_edit_booking() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;
    let date = in_days(4);

    let first = book(&app, &auth, json!({
        "teacher": teacher, "size": 10, "room": room, "date": date, "lesson": 1
    })).await;
    let first_id = first["bookID"].as_i64().unwrap();
    let second = book(&app, &auth, json!({
        "teacher": teacher, "size": 10, "room": room, "date": date, "lesson": 2
    })).await;
    let second_id = second["bookID"].as_i64().unwrap();

    // Keeping its own slot is not a clash
    let (_, body) = app.post_json("/ajax/edit/booking", Some(&auth), json!({
        "id": first_id, "teacher": teacher, "size": 28, "room": room, "date": date, "lesson": 1
    })).await;
    assert_eq!(body["success"], 1, "{}", body);
    assert_eq!(body["bookID"], first_id);
    assert_eq!(body["roomID"], room);

    let stored = app.state.booking_repo.find_by_id(first_id).await.unwrap().unwrap();
    assert_eq!(stored.size, 28);

    let (_, body) = app.post_json("/ajax/edit/booking", Some(&auth), json!({
        "id": first_id, "teacher": teacher, "size": 28, "room": room, "date": date, "lesson": 2
    })).await;
    assert_eq!(body["error"], "A booking already exists there");

    let (_, body) = app.post_json("/ajax/edit/booking", Some(&auth), json!({
        "id": second_id, "teacher": teacher, "size": 10, "room": room, "date": date, "lesson": 3
    })).await;
    assert_eq!(body["success"], 1, "{}", body);

    let (_, body) = app.post_json("/ajax/edit/booking", Some(&auth), json!({
        "id": 9999, "teacher": teacher, "size": 10, "room": room, "date": date, "lesson": 5
    })).await;
    assert_eq!(body["error"], "No booking exists under that id");

    let (_, body) = app.post_json("/ajax/edit/booking", Some(&auth), json!({
        "teacher": teacher, "size": 10, "room": room, "date": date, "lesson": 5
    })).await;
    assert_eq!(body["error"], "Please check you have filled in all the information");
}

#[tokio::test]
async fn test_remove_booking_frees_the_slot() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;
    let slot = json!({ "teacher": teacher, "size": 10, "room": room, "date": in_days(6), "lesson": 3 });

    let created = book(&app, &auth, slot.clone()).await;
    let booking_id = created["bookID"].as_i64().unwrap();

    let (_, body) = app.post_json("/ajax/remove/booking", Some(&auth), json!({ "id": booking_id })).await;
    assert_eq!(body["success"], 1);

    let (_, body) = app.post_json("/ajax/remove/booking", Some(&auth), json!({ "id": booking_id })).await;
    assert_eq!(body["error"], "No booking exists under that id");

    let again = book(&app, &auth, slot).await;
    assert_eq!(again["success"], 1, "{}", again);
}

#[tokio::test]
async fn test_timetable_shows_booking() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;

    let today = today();
    let next_monday = today - Duration::days(today.weekday().num_days_from_monday() as i64) + Duration::weeks(1);

    let created = book(&app, &auth, json!({
        "teacher": teacher, "size": 17, "room": room,
        "date": next_monday.format("%Y-%m-%d").to_string(), "lesson": 3
    })).await;
    let booking_id = created["bookID"].as_i64().unwrap();

    let (status, html) = app.get_page(&format!("/timetable/{}/1", room), Some(&auth)).await;
    assert_eq!(status, 200);
    assert!(html.contains("Dr Hopper (17)"), "{}", html);
    assert!(html.contains(&format!("/booking/{}", booking_id)));
    assert!(html.contains(&next_monday.format("%a %d").to_string()));

    let (status, html) = app.get_page(&format!("/timetable/{}", room), Some(&auth)).await;
    assert_eq!(status, 200);
    assert!(!html.contains("Dr Hopper (17)"));

    let (status, html) = app.get_page(&format!("/booking/{}", booking_id), Some(&auth)).await;
    assert_eq!(status, 200);
    assert!(html.contains("Grace Hopper"));
    assert!(html.contains("Lab 1"));
}

#[tokio::test]
async fn test_wrongly_typed_values_get_a_write_response() {
    let app = TestApp::new().await;
    let (auth, room, teacher) = setup(&app, 30).await;

    let cases = [
        (json!({ "teacher": true, "size": 5, "room": room, "date": in_days(2), "lesson": 1 }), "Invalid teacher"),
        (json!({ "teacher": teacher, "size": 5, "room": [room], "date": in_days(2), "lesson": 1 }), "Invalid room"),
        (json!({ "teacher": teacher, "size": {"n": 5}, "room": room, "date": in_days(2), "lesson": 1 }),
            "Invalid class size"),
        (json!({ "teacher": teacher, "size": 5, "room": room, "date": 20300101, "lesson": 1 }), "Invalid date"),
    ];

    for (payload, expected) in cases {
        let (status, body) = app.post_json("/ajax/add/booking", Some(&auth), payload.clone()).await;
        assert_eq!(status, StatusCode::OK, "{}", payload);
        assert_eq!(body["success"], 0, "{}", payload);
        assert_eq!(body["error"], expected, "{}", payload);
    }

    let (status, body) = app.post_json("/ajax/add/booking", Some(&auth), json!("teacher=1&size=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "Please check you have filled in all the information");

    assert!(app.state.booking_repo.list_all().await.unwrap().is_empty());
}
