use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A category of coded values, e.g. "GENDER" or "ROLE". The code is unique
/// across categories.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct SystemCode {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateSystemCode {
    pub code: String,
    pub description: String,
}

impl SystemCode {
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateSystemCode,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r#"INSERT INTO system_codes (id, code, description)
               VALUES ($1, $2, $3)
               RETURNING id, code, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.code)
        .bind(&data.description)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, code, description, created_at, updated_at
               FROM system_codes
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_code(pool: &SqlitePool, code: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, code, description, created_at, updated_at
               FROM system_codes
               WHERE code = $1"#,
        )
        .bind(code)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, code, description, created_at, updated_at
               FROM system_codes"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateSystemCode,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"UPDATE system_codes
               SET code = $2, description = $3, updated_at = CURRENT_TIMESTAMP
               WHERE id = $1
               RETURNING id, code, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.code)
        .bind(&data.description)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"DELETE FROM system_codes
               WHERE id = $1
               RETURNING id, code, description, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
