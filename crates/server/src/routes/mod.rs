use axum::Router;

use crate::AppState;

pub mod health;
pub mod system_code_details;
pub mod system_codes;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(system_codes::router())
        .merge(system_code_details::router())
}
