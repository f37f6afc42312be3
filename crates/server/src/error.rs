use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use services::services::{role_provisioning::RoleProvisioningError, system_codes::SystemCodeError};
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    SystemCode(#[from] SystemCodeError),
    #[error(transparent)]
    RoleProvisioning(#[from] RoleProvisioningError),
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SystemCode(SystemCodeError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::SystemCode(SystemCodeError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::RoleProvisioning(RoleProvisioningError::DetailNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::RoleProvisioning(RoleProvisioningError::RoleCreation { .. }) => {
                StatusCode::CONFLICT
            }
            ApiError::RoleProvisioning(RoleProvisioningError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (
            status,
            ResponseJson(ApiResponse::<()>::error(self.to_string())),
        )
            .into_response()
    }
}
