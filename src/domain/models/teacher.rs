use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Teacher {
    pub id: i64,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
}

impl Teacher {
    /// "Mr Smith" style label used on the timetable.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.title, self.last_name)
    }
}

/// Validated teacher fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherFields {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Default, Clone)]
pub struct TeacherForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
