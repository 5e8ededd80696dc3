use crate::domain::{models::room::Room, ports::RoomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteRoomRepo {
    pool: SqlitePool,
}

impl SqliteRoomRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for SqliteRoomRepo {
    async fn create(&self, name: &str, capacity: i64) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (name, capacity) VALUES (?, ?) RETURNING id, name, capacity"
        )
            .bind(name)
            .bind(capacity)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT id, name, capacity FROM rooms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_name(&self) -> Result<Vec<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT id, name, capacity FROM rooms ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Room not found".into()));
        }
        Ok(())
    }
}
