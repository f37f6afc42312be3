use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Whether a coded value is still offered to callers.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "detail_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DetailStatus {
    #[default]
    Active,
    Inactive,
}

/// One coded value within a category, e.g. code "M" under "GENDER". Detail
/// codes are unique within their category, not globally.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct SystemCodeDetail {
    pub id: Uuid,
    pub system_code_id: Uuid, // Foreign key to SystemCode
    pub code: String,
    pub description: String,
    pub sort_order: Option<i32>,
    pub status: DetailStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A detail joined with its owning category's code and description. Every
/// read path returns this shape.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct SystemCodeDetailWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub detail: SystemCodeDetail,
    pub category_code: String,
    pub category_description: String,
}

impl std::ops::Deref for SystemCodeDetailWithCategory {
    type Target = SystemCodeDetail;
    fn deref(&self) -> &Self::Target {
        &self.detail
    }
}

/// One page of results plus the overall row count.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub current_page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateSystemCodeDetail {
    pub system_code_id: Uuid,
    pub code: String,
    pub description: String,
    pub sort_order: Option<i32>,
    pub status: Option<DetailStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateSystemCodeDetail {
    pub code: String,
    pub description: String,
    pub sort_order: Option<i32>,
    pub status: Option<DetailStatus>,
}

const DETAIL_COLUMNS: &str =
    "id, system_code_id, code, description, sort_order, status, created_at, updated_at";

const JOINED_COLUMNS: &str = "d.id, d.system_code_id, d.code, d.description, d.sort_order, \
     d.status, d.created_at, d.updated_at, \
     c.code AS category_code, c.description AS category_description";

const JOINED_FROM: &str = "FROM system_code_details d \
     JOIN system_codes c ON c.id = d.system_code_id";

impl SystemCodeDetail {
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateSystemCodeDetail,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let status = data.status.clone().unwrap_or_default();
        let sql = format!(
            r#"INSERT INTO system_code_details (id, system_code_id, code, description, sort_order, status)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {DETAIL_COLUMNS}"#
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(data.system_code_id)
            .bind(&data.code)
            .bind(&data.description)
            .bind(data.sort_order)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<Option<SystemCodeDetailWithCategory>, sqlx::Error> {
        let sql = format!("SELECT {JOINED_COLUMNS} {JOINED_FROM} WHERE d.id = $1");
        sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn find_all(
        pool: &SqlitePool,
    ) -> Result<Vec<SystemCodeDetailWithCategory>, sqlx::Error> {
        let sql = format!("SELECT {JOINED_COLUMNS} {JOINED_FROM}");
        sqlx::query_as(&sql).fetch_all(pool).await
    }

    /// All details whose owning category's code equals `category_code`,
    /// case-sensitive exact match.
    pub async fn find_by_category_code(
        pool: &SqlitePool,
        category_code: &str,
    ) -> Result<Vec<SystemCodeDetailWithCategory>, sqlx::Error> {
        let sql = format!("SELECT {JOINED_COLUMNS} {JOINED_FROM} WHERE c.code = $1");
        sqlx::query_as(&sql)
            .bind(category_code)
            .fetch_all(pool)
            .await
    }

    /// The first detail matching both the category code and its own code.
    pub async fn find_by_category_and_detail_code(
        pool: &SqlitePool,
        category_code: &str,
        detail_code: &str,
    ) -> Result<Option<SystemCodeDetailWithCategory>, sqlx::Error> {
        let sql = format!(
            "SELECT {JOINED_COLUMNS} {JOINED_FROM} \
             WHERE c.code = $1 AND d.code = $2 \
             ORDER BY d.created_at, d.id \
             LIMIT 1"
        );
        sqlx::query_as(&sql)
            .bind(category_code)
            .bind(detail_code)
            .fetch_optional(pool)
            .await
    }

    /// One 1-based page of joined details plus the table-wide row count.
    /// Pages are ordered by (created_at, id) so they partition the table;
    /// a page past the end is empty with the count still correct.
    pub async fn find_page(
        pool: &SqlitePool,
        page: i64,
        page_size: i64,
    ) -> Result<Page<SystemCodeDetailWithCategory>, sqlx::Error> {
        let total_items =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM system_code_details")
                .fetch_one(pool)
                .await?;

        let sql = format!(
            "SELECT {JOINED_COLUMNS} {JOINED_FROM} \
             ORDER BY d.created_at, d.id \
             LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as(&sql)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(pool)
            .await?;

        Ok(Page {
            items,
            total_items,
            current_page: page,
            page_size,
        })
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateSystemCodeDetail,
    ) -> Result<Option<Self>, sqlx::Error> {
        let status = data.status.clone().unwrap_or_default();
        let sql = format!(
            r#"UPDATE system_code_details
               SET code = $2, description = $3, sort_order = $4, status = $5,
                   updated_at = CURRENT_TIMESTAMP
               WHERE id = $1
               RETURNING {DETAIL_COLUMNS}"#
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(&data.code)
            .bind(&data.description)
            .bind(data.sort_order)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            r#"DELETE FROM system_code_details
               WHERE id = $1
               RETURNING {DETAIL_COLUMNS}"#
        );
        sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::models::system_code::{CreateSystemCode, SystemCode};

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        crate::MIGRATOR.run(&pool).await.expect("migrations");
        pool
    }

    async fn category(pool: &SqlitePool, code: &str) -> SystemCode {
        SystemCode::create(
            pool,
            &CreateSystemCode {
                code: code.to_string(),
                description: format!("{code} category"),
            },
            Uuid::new_v4(),
        )
        .await
        .expect("create category")
    }

    async fn detail(pool: &SqlitePool, category: &SystemCode, code: &str) -> SystemCodeDetail {
        SystemCodeDetail::create(
            pool,
            &CreateSystemCodeDetail {
                system_code_id: category.id,
                code: code.to_string(),
                description: format!("{code} value"),
                sort_order: None,
                status: None,
            },
            Uuid::new_v4(),
        )
        .await
        .expect("create detail")
    }

    async fn detail_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM system_code_details")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_find_by_id_returns_row_with_category() {
        let pool = test_pool().await;
        let gender = category(&pool, "GENDER").await;
        let created = detail(&pool, &gender, "M").await;

        let found = SystemCodeDetail::find_by_id(&pool, created.id)
            .await
            .unwrap()
            .expect("detail should exist");

        assert_eq!(found.id, created.id);
        assert_eq!(found.code, "M");
        assert_eq!(found.system_code_id, gender.id);
        assert_eq!(found.status, DetailStatus::Active);
        assert_eq!(found.category_code, "GENDER");
        assert_eq!(found.category_description, gender.description);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let pool = test_pool().await;
        let found = SystemCodeDetail::find_by_id(&pool, Uuid::new_v4())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_missing_id_returns_none_and_leaves_rows() {
        let pool = test_pool().await;
        let gender = category(&pool, "GENDER").await;
        detail(&pool, &gender, "M").await;
        detail(&pool, &gender, "F").await;

        let removed = SystemCodeDetail::delete(&pool, Uuid::new_v4()).await.unwrap();

        assert!(removed.is_none());
        assert_eq!(detail_count(&pool).await, 2);
    }

    #[tokio::test]
    async fn delete_returns_the_removed_row() {
        let pool = test_pool().await;
        let gender = category(&pool, "GENDER").await;
        let created = detail(&pool, &gender, "M").await;

        let removed = SystemCodeDetail::delete(&pool, created.id)
            .await
            .unwrap()
            .expect("row should be removed");

        assert_eq!(removed.id, created.id);
        assert_eq!(detail_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn find_by_category_code_filters_exactly() {
        let pool = test_pool().await;
        let gender = category(&pool, "GENDER").await;
        let role = category(&pool, "ROLE").await;
        let status = category(&pool, "STATUS").await;
        detail(&pool, &gender, "M").await;
        detail(&pool, &gender, "F").await;
        detail(&pool, &role, "TEACHER").await;
        detail(&pool, &status, "OPEN").await;

        let genders = SystemCodeDetail::find_by_category_code(&pool, "GENDER")
            .await
            .unwrap();

        assert_eq!(genders.len(), 2);
        assert!(genders.iter().all(|d| d.category_code == "GENDER"));

        let none = SystemCodeDetail::find_by_category_code(&pool, "gender")
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_by_category_and_detail_code_requires_both_matches() {
        let pool = test_pool().await;
        let gender = category(&pool, "GENDER").await;
        let role = category(&pool, "ROLE").await;
        detail(&pool, &gender, "M").await;
        detail(&pool, &role, "M").await;

        let found = SystemCodeDetail::find_by_category_and_detail_code(&pool, "GENDER", "M")
            .await
            .unwrap()
            .expect("match expected");
        assert_eq!(found.category_code, "GENDER");
        assert_eq!(found.code, "M");

        let wrong_detail =
            SystemCodeDetail::find_by_category_and_detail_code(&pool, "GENDER", "X")
                .await
                .unwrap();
        assert!(wrong_detail.is_none());

        let wrong_category =
            SystemCodeDetail::find_by_category_and_detail_code(&pool, "NOPE", "M")
                .await
                .unwrap();
        assert!(wrong_category.is_none());
    }

    #[tokio::test]
    async fn pages_partition_the_table() {
        let pool = test_pool().await;
        let role = category(&pool, "ROLE").await;
        for code in ["A", "B", "C", "D", "E"] {
            detail(&pool, &role, code).await;
        }

        let mut seen = Vec::new();
        for page in 1..=3 {
            let p = SystemCodeDetail::find_page(&pool, page, 2).await.unwrap();
            assert_eq!(p.total_items, 5);
            assert_eq!(p.current_page, page);
            assert_eq!(p.page_size, 2);
            assert!(p.items.len() <= 2);
            seen.extend(p.items.into_iter().map(|d| d.id));
        }

        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_correct_total() {
        let pool = test_pool().await;
        let role = category(&pool, "ROLE").await;
        detail(&pool, &role, "A").await;

        let p = SystemCodeDetail::find_page(&pool, 4, 10).await.unwrap();

        assert!(p.items.is_empty());
        assert_eq!(p.total_items, 1);
        assert_eq!(p.current_page, 4);
    }

    #[tokio::test]
    async fn detail_code_is_unique_within_category_only() {
        let pool = test_pool().await;
        let gender = category(&pool, "GENDER").await;
        let role = category(&pool, "ROLE").await;
        detail(&pool, &gender, "M").await;

        // Same code under another category is fine.
        detail(&pool, &role, "M").await;

        // A duplicate within the same category is rejected by the store.
        let dup = SystemCodeDetail::create(
            &pool,
            &CreateSystemCodeDetail {
                system_code_id: gender.id,
                code: "M".to_string(),
                description: "duplicate".to_string(),
                sort_order: None,
                status: None,
            },
            Uuid::new_v4(),
        )
        .await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn update_replaces_the_row() {
        let pool = test_pool().await;
        let gender = category(&pool, "GENDER").await;
        let created = detail(&pool, &gender, "M").await;

        let updated = SystemCodeDetail::update(
            &pool,
            created.id,
            &UpdateSystemCodeDetail {
                code: "MALE".to_string(),
                description: "Male".to_string(),
                sort_order: Some(1),
                status: Some(DetailStatus::Inactive),
            },
        )
        .await
        .unwrap()
        .expect("row should exist");

        assert_eq!(updated.code, "MALE");
        assert_eq!(updated.sort_order, Some(1));
        assert_eq!(updated.status, DetailStatus::Inactive);

        let missing = SystemCodeDetail::update(
            &pool,
            Uuid::new_v4(),
            &UpdateSystemCodeDetail {
                code: "X".to_string(),
                description: "x".to_string(),
                sort_order: None,
                status: None,
            },
        )
        .await
        .unwrap();
        assert!(missing.is_none());
    }
}
