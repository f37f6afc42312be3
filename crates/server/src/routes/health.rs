use axum::{Router, response::Json as ResponseJson, routing::get};
use utils::response::ApiResponse;

use crate::AppState;

pub async fn health() -> ResponseJson<ApiResponse<serde_json::Value>> {
    ResponseJson(ApiResponse::success(serde_json::json!({ "status": "ok" })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
