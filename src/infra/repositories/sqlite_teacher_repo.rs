use crate::domain::{models::teacher::{Teacher, TeacherFields}, ports::TeacherRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTeacherRepo {
    pool: SqlitePool,
}

impl SqliteTeacherRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepository for SqliteTeacherRepo {
    async fn create(&self, fields: &TeacherFields) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (title, first_name, last_name) VALUES (?, ?, ?) RETURNING id, title, first_name, last_name"
        )
            .bind(&fields.title)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, AppError> {
        sqlx::query_as::<_, Teacher>("SELECT id, title, first_name, last_name FROM teachers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_last_name(&self) -> Result<Vec<Teacher>, AppError> {
        sqlx::query_as::<_, Teacher>(
            "SELECT id, title, first_name, last_name FROM teachers ORDER BY last_name ASC, first_name ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, fields: &TeacherFields) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(
            "UPDATE teachers SET title=?, first_name=?, last_name=? WHERE id=? RETURNING id, title, first_name, last_name"
        )
            .bind(&fields.title)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Teacher not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Teacher not found".into()));
        }
        Ok(())
    }
}
