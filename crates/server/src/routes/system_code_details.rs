//! Routes for taxonomy details and the role-provisioning trigger.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::system_code_detail::{
    CreateSystemCodeDetail, Page, SystemCodeDetail, SystemCodeDetailWithCategory,
    UpdateSystemCodeDetail,
};
use serde::{Deserialize, Serialize};
use services::services::{
    role_provisioning::{ProvisioningActor, RoleProvisioningOutcome, RoleProvisioningService},
    system_codes::SystemCodeService,
};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Clone, Deserialize, TS)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// Request body for the role-provisioning trigger; the acting user is
/// recorded on the created role's audit fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct EnsureRoleRequest {
    pub acting_user_id: Uuid,
}

pub async fn create_detail(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateSystemCodeDetail>,
) -> Result<ResponseJson<ApiResponse<SystemCodeDetail>>, ApiError> {
    let detail = SystemCodeService::add_detail(&state.db.pool, payload).await?;
    Ok(ResponseJson(ApiResponse::success(detail)))
}

pub async fn list_details(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<SystemCodeDetailWithCategory>>>, ApiError> {
    let details = SystemCodeService::list_details(&state.db.pool).await?;
    Ok(ResponseJson(ApiResponse::success(details)))
}

pub async fn paged_details(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ResponseJson<ApiResponse<Page<SystemCodeDetailWithCategory>>>, ApiError> {
    let page =
        SystemCodeService::detail_page(&state.db.pool, query.page, query.page_size).await?;
    Ok(ResponseJson(ApiResponse::success(page)))
}

pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<SystemCodeDetailWithCategory>>, ApiError> {
    let detail = SystemCodeService::get_detail(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no system code detail with id {id}")))?;
    Ok(ResponseJson(ApiResponse::success(detail)))
}

pub async fn update_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateSystemCodeDetail>,
) -> Result<ResponseJson<ApiResponse<SystemCodeDetail>>, ApiError> {
    let detail = SystemCodeService::update_detail(&state.db.pool, id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no system code detail with id {id}")))?;
    Ok(ResponseJson(ApiResponse::success(detail)))
}

pub async fn delete_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<SystemCodeDetail>>, ApiError> {
    let detail = SystemCodeService::delete_detail(&state.db.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no system code detail with id {id}")))?;
    Ok(ResponseJson(ApiResponse::success(detail)))
}

pub async fn ensure_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<EnsureRoleRequest>,
) -> Result<ResponseJson<ApiResponse<RoleProvisioningOutcome>>, ApiError> {
    let outcome = RoleProvisioningService::ensure_role_exists(
        &state.db.pool,
        id,
        ProvisioningActor {
            user_id: payload.acting_user_id,
        },
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(outcome)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/system-code-details",
        Router::new()
            .route("/", post(create_detail).get(list_details))
            .route("/paged", get(paged_details))
            .route(
                "/{id}",
                get(get_detail).put(update_detail).delete(delete_detail),
            )
            .route("/{id}/ensure-role", post(ensure_role)),
    )
}
