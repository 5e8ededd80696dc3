use serde::Deserialize;

use crate::domain::models::booking::BookingForm;
use crate::domain::models::room::RoomForm;
use crate::domain::models::teacher::TeacherForm;

/// A posted form value. Strings and numbers are the expected shapes; any
/// other JSON value is kept as its JSON text and fails the field checks.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum FormValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl FormValue {
    fn into_text(self) -> String {
        match self {
            FormValue::Number(n) => n.to_string(),
            FormValue::Text(s) => s,
            FormValue::Other(v) => v.to_string(),
        }
    }
}

fn text(value: Option<FormValue>) -> Option<String> {
    value.map(FormValue::into_text)
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub user: Option<FormValue>,
    pub pass: Option<FormValue>,
}

impl LoginRequest {
    /// Username and password, or `None` when either is absent.
    pub fn credentials(self) -> Option<(String, String)> {
        Some((text(self.user)?, text(self.pass)?))
    }
}

#[derive(Deserialize)]
pub struct AddRoomRequest {
    pub name: Option<FormValue>,
    pub capacity: Option<FormValue>,
}

impl From<AddRoomRequest> for RoomForm {
    fn from(req: AddRoomRequest) -> Self {
        RoomForm { name: text(req.name), capacity: text(req.capacity) }
    }
}

#[derive(Deserialize)]
pub struct RemoveRoomRequest {
    pub room: Option<FormValue>,
}

#[derive(Deserialize)]
pub struct TeacherRequest {
    pub id: Option<FormValue>,
    pub title: Option<FormValue>,
    #[serde(rename = "fName")]
    pub first_name: Option<FormValue>,
    #[serde(rename = "lName")]
    pub last_name: Option<FormValue>,
}

impl From<TeacherRequest> for TeacherForm {
    fn from(req: TeacherRequest) -> Self {
        TeacherForm {
            id: text(req.id),
            title: text(req.title),
            first_name: text(req.first_name),
            last_name: text(req.last_name),
        }
    }
}

#[derive(Deserialize)]
pub struct RemoveTeacherRequest {
    pub teacher: Option<FormValue>,
}

#[derive(Deserialize)]
pub struct BookingRequest {
    pub id: Option<FormValue>,
    pub teacher: Option<FormValue>,
    pub size: Option<FormValue>,
    pub room: Option<FormValue>,
    pub date: Option<FormValue>,
    pub lesson: Option<FormValue>,
}

impl From<BookingRequest> for BookingForm {
    fn from(req: BookingRequest) -> Self {
        BookingForm {
            id: text(req.id),
            teacher: text(req.teacher),
            size: text(req.size),
            room: text(req.room),
            date: text(req.date),
            lesson: text(req.lesson),
        }
    }
}

#[derive(Deserialize)]
pub struct RemoveBookingRequest {
    pub id: Option<FormValue>,
}

/// Turns the single id field of a removal request into text.
pub fn id_text(value: Option<FormValue>) -> Option<String> {
    text(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_request_accepts_strings_and_numbers() {
        let req: BookingRequest = serde_json::from_value(json!({
            "teacher": 1, "size": "20", "room": 3, "date": "2099-01-01", "lesson": 2.5
        }))
        .unwrap();
        let form = BookingForm::from(req);

        assert_eq!(form.teacher.as_deref(), Some("1"));
        assert_eq!(form.size.as_deref(), Some("20"));
        assert_eq!(form.room.as_deref(), Some("3"));
        assert_eq!(form.lesson.as_deref(), Some("2.5"));
        assert_eq!(form.id, None);
    }

    #[test]
    fn test_unexpected_json_types_become_text() {
        let req: BookingRequest = serde_json::from_value(json!({
            "teacher": true, "size": [20], "room": {"id": 1}, "lesson": null
        }))
        .unwrap();
        let form = BookingForm::from(req);

        assert_eq!(form.teacher.as_deref(), Some("true"));
        assert_eq!(form.size.as_deref(), Some("[20]"));
        assert_eq!(form.room.as_deref(), Some("{\"id\":1}"));
        assert_eq!(form.lesson, None);
    }

    #[test]
    fn test_login_without_password_has_no_credentials() {
        let req: LoginRequest = serde_json::from_value(json!({ "user": "admin" })).unwrap();
        assert!(req.credentials().is_none());

        let req: LoginRequest = serde_json::from_value(json!({ "user": "admin", "pass": 1234 })).unwrap();
        assert_eq!(req.credentials(), Some(("admin".to_string(), "1234".to_string())));
    }

    #[test]
    fn test_teacher_request_uses_form_names() {
        let req: TeacherRequest = serde_json::from_value(json!({
            "title": "Mr", "fName": "Alan", "lName": "Turing"
        }))
        .unwrap();
        let form = TeacherForm::from(req);
        assert_eq!(form.first_name.as_deref(), Some("Alan"));
        assert_eq!(form.last_name.as_deref(), Some("Turing"));
    }
}
