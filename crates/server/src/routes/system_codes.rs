//! Routes for taxonomy categories and lookups by category code.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::{
    system_code::{CreateSystemCode, SystemCode},
    system_code_detail::SystemCodeDetailWithCategory,
};
use services::services::system_codes::SystemCodeService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn create_system_code(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateSystemCode>,
) -> Result<ResponseJson<ApiResponse<SystemCode>>, ApiError> {
    let code = SystemCodeService::add_category(&state.db.pool, payload).await?;
    Ok(ResponseJson(ApiResponse::success(code)))
}

pub async fn list_system_codes(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<SystemCode>>>, ApiError> {
    let codes = SystemCodeService::list_categories(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(codes)))
}

pub async fn get_system_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<SystemCode>>, ApiError> {
    let code = SystemCodeService::get_category(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no system code with id {id}")))?;
    Ok(ResponseJson(ApiResponse::success(code)))
}

pub async fn update_system_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateSystemCode>,
) -> Result<ResponseJson<ApiResponse<SystemCode>>, ApiError> {
    let code = SystemCodeService::update_category(&state.db.pool, id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no system code with id {id}")))?;
    Ok(ResponseJson(ApiResponse::success(code)))
}

pub async fn delete_system_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<SystemCode>>, ApiError> {
    let code = SystemCodeService::delete_category(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no system code with id {id}")))?;
    Ok(ResponseJson(ApiResponse::success(code)))
}

pub async fn details_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<ResponseJson<ApiResponse<Vec<SystemCodeDetailWithCategory>>>, ApiError> {
    let details = SystemCodeService::details_by_category(&state.db.pool, &code).await?;
    Ok(ResponseJson(ApiResponse::success(details)))
}

pub async fn detail_by_codes(
    State(state): State<AppState>,
    Path((code, detail_code)): Path<(String, String)>,
) -> Result<ResponseJson<ApiResponse<SystemCodeDetailWithCategory>>, ApiError> {
    let detail = SystemCodeService::detail_by_codes(&state.db.pool, &code, &detail_code)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("no detail {detail_code} under system code {code}"))
        })?;
    Ok(ResponseJson(ApiResponse::success(detail)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/system-codes",
        Router::new()
            .route("/", post(create_system_code).get(list_system_codes))
            .route(
                "/{id}",
                get(get_system_code)
                    .put(update_system_code)
                    .delete(delete_system_code),
            )
            .route("/by-code/{code}/details", get(details_by_code))
            .route("/by-code/{code}/details/{detail_code}", get(detail_by_codes)),
    )
}
