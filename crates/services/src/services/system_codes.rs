//! Validated CRUD over the system-code taxonomy.
//!
//! Not-found on plain reads and deletes stays an absent result; only bad
//! input and storage failures are errors.

use db::models::{
    system_code::{CreateSystemCode, SystemCode},
    system_code_detail::{
        CreateSystemCodeDetail, Page, SystemCodeDetail, SystemCodeDetailWithCategory,
        UpdateSystemCodeDetail,
    },
};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SystemCodeError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct SystemCodeService;

impl SystemCodeService {
    pub async fn add_category(
        pool: &SqlitePool,
        data: CreateSystemCode,
    ) -> Result<SystemCode, SystemCodeError> {
        if data.code.trim().is_empty() {
            return Err(SystemCodeError::Validation(
                "category code must not be blank".to_string(),
            ));
        }
        Ok(SystemCode::create(pool, &data, Uuid::new_v4()).await?)
    }

    pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<SystemCode>, SystemCodeError> {
        Ok(SystemCode::find_all(pool).await?)
    }

    pub async fn get_category(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<Option<SystemCode>, SystemCodeError> {
        Ok(SystemCode::find_by_id(pool, id).await?)
    }

    pub async fn update_category(
        pool: &SqlitePool,
        id: Uuid,
        data: CreateSystemCode,
    ) -> Result<Option<SystemCode>, SystemCodeError> {
        if data.code.trim().is_empty() {
            return Err(SystemCodeError::Validation(
                "category code must not be blank".to_string(),
            ));
        }
        Ok(SystemCode::update(pool, id, &data).await?)
    }

    pub async fn delete_category(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<Option<SystemCode>, SystemCodeError> {
        Ok(SystemCode::delete(pool, id).await?)
    }

    pub async fn add_detail(
        pool: &SqlitePool,
        data: CreateSystemCodeDetail,
    ) -> Result<SystemCodeDetail, SystemCodeError> {
        if data.code.trim().is_empty() {
            return Err(SystemCodeError::Validation(
                "detail code must not be blank".to_string(),
            ));
        }
        Ok(SystemCodeDetail::create(pool, &data, Uuid::new_v4()).await?)
    }

    pub async fn get_detail(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<Option<SystemCodeDetailWithCategory>, SystemCodeError> {
        Ok(SystemCodeDetail::find_by_id(pool, id).await?)
    }

    pub async fn list_details(
        pool: &SqlitePool,
    ) -> Result<Vec<SystemCodeDetailWithCategory>, SystemCodeError> {
        Ok(SystemCodeDetail::find_all(pool).await?)
    }

    pub async fn details_by_category(
        pool: &SqlitePool,
        category_code: &str,
    ) -> Result<Vec<SystemCodeDetailWithCategory>, SystemCodeError> {
        Ok(SystemCodeDetail::find_by_category_code(pool, category_code).await?)
    }

    pub async fn detail_by_codes(
        pool: &SqlitePool,
        category_code: &str,
        detail_code: &str,
    ) -> Result<Option<SystemCodeDetailWithCategory>, SystemCodeError> {
        Ok(
            SystemCodeDetail::find_by_category_and_detail_code(pool, category_code, detail_code)
                .await?,
        )
    }

    pub async fn detail_page(
        pool: &SqlitePool,
        page: i64,
        page_size: i64,
    ) -> Result<Page<SystemCodeDetailWithCategory>, SystemCodeError> {
        if page < 1 || page_size < 1 {
            return Err(SystemCodeError::Validation(format!(
                "page and page_size must be at least 1, got page {page} size {page_size}"
            )));
        }
        Ok(SystemCodeDetail::find_page(pool, page, page_size).await?)
    }

    pub async fn update_detail(
        pool: &SqlitePool,
        id: Uuid,
        data: UpdateSystemCodeDetail,
    ) -> Result<Option<SystemCodeDetail>, SystemCodeError> {
        if data.code.trim().is_empty() {
            return Err(SystemCodeError::Validation(
                "detail code must not be blank".to_string(),
            ));
        }
        Ok(SystemCodeDetail::update(pool, id, &data).await?)
    }

    pub async fn delete_detail(
        pool: &SqlitePool,
        id: Uuid,
    ) -> Result<Option<SystemCodeDetail>, SystemCodeError> {
        Ok(SystemCodeDetail::delete(pool, id).await?)
    }
}
