use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// An authorization role. Rows are written by role provisioning and read by
/// the identity layer; nothing in this service ever deletes them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub normalized_name: String,
    pub description: String,
    pub created_by: Uuid,
    pub reviewed_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub concurrency_stamp: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateRole {
    pub name: String,
    pub normalized_name: String,
    pub description: String,
    pub created_by: Uuid,
    pub reviewed_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub concurrency_stamp: Uuid,
}

const ROLE_COLUMNS: &str =
    "id, name, normalized_name, description, created_by, reviewed_by, created_at, concurrency_stamp";

impl Role {
    /// Case-insensitive lookup via the normalized-name index.
    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE normalized_name = $1");
        sqlx::query_as(&sql)
            .bind(name.to_uppercase())
            .fetch_optional(pool)
            .await
    }

    /// Insert a role. The unique index on `normalized_name` rejects a
    /// second role for the same name.
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateRole,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            r#"INSERT INTO roles
                   (id, name, normalized_name, description, created_by, reviewed_by, created_at, concurrency_stamp)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {ROLE_COLUMNS}"#
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(&data.name)
            .bind(&data.normalized_name)
            .bind(&data.description)
            .bind(data.created_by)
            .bind(data.reviewed_by)
            .bind(data.created_at)
            .bind(data.concurrency_stamp)
            .fetch_one(pool)
            .await
    }
}
