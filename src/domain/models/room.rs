use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
}

/// Raw room form as submitted by an administrator.
#[derive(Debug, Default, Clone)]
pub struct RoomForm {
    pub name: Option<String>,
    pub capacity: Option<String>,
}
