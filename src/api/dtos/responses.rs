use serde::Serialize;

/// Body of every `/ajax` write endpoint.
#[derive(Serialize, Debug, Default)]
pub struct WriteResponse {
    pub success: u8,
    pub error: String,
    #[serde(rename = "roomID", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(rename = "bookID", skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl WriteResponse {
    pub fn ok() -> Self {
        Self { success: 1, ..Default::default() }
    }

    pub fn failure(error: String) -> Self {
        Self { success: 0, error, ..Default::default() }
    }

    pub fn with_booking(mut self, book_id: i64, room_id: i64) -> Self {
        self.book_id = Some(book_id);
        self.room_id = Some(room_id);
        self
    }

    pub fn with_csrf(mut self, token: String) -> Self {
        self.csrf_token = Some(token);
        self
    }
}
