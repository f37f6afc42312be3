//! Lazily materializes authorization roles from system code details.
//!
//! A detail designated as a role is provisioned at most once per code: the
//! role name is the detail's code, and an existing role of that name makes
//! the call a no-op. There is no lock around the find-then-create sequence;
//! the unique index on the role's normalized name arbitrates concurrent
//! first-time calls, and the loser surfaces the store's rejection.

use chrono::Utc;
use db::models::{
    role::{CreateRole, Role},
    system_code_detail::SystemCodeDetail,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info, warn};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RoleProvisioningError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("no system code detail found with id {0}")]
    DetailNotFound(Uuid),
    #[error("error creating role {role}: {reasons}")]
    RoleCreation { role: String, reasons: String },
}

/// The identity recorded on roles created by provisioning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
pub struct ProvisioningActor {
    pub user_id: Uuid,
}

/// What provisioning did for a given detail.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "outcome", content = "role", rename_all = "snake_case")]
pub enum RoleProvisioningOutcome {
    Created(Role),
    AlreadyExists(Role),
}

impl RoleProvisioningOutcome {
    pub fn role(&self) -> &Role {
        match self {
            Self::Created(role) | Self::AlreadyExists(role) => role,
        }
    }
}

pub struct RoleProvisioningService;

impl RoleProvisioningService {
    /// Ensure a role named after the detail's code exists. Safe to call
    /// repeatedly for the same detail.
    pub async fn ensure_role_exists(
        pool: &SqlitePool,
        detail_id: Uuid,
        actor: ProvisioningActor,
    ) -> Result<RoleProvisioningOutcome, RoleProvisioningError> {
        let Some(detail) = SystemCodeDetail::find_by_id(pool, detail_id).await? else {
            warn!(detail_id = %detail_id, "no system code detail with this id");
            return Err(RoleProvisioningError::DetailNotFound(detail_id));
        };

        let name = detail.code.clone();
        let description = if detail.description.trim().is_empty() {
            format!("Default description for {name}")
        } else {
            detail.description.clone()
        };

        if let Some(role) = Role::find_by_name(pool, &name).await? {
            info!(role = %role.name, "role already exists, nothing to provision");
            return Ok(RoleProvisioningOutcome::AlreadyExists(role));
        }

        let data = CreateRole {
            normalized_name: name.to_uppercase(),
            name,
            description,
            created_by: actor.user_id,
            reviewed_by: actor.user_id,
            created_at: Utc::now(),
            concurrency_stamp: Uuid::new_v4(),
        };

        match Role::create(pool, &data, Uuid::new_v4()).await {
            Ok(role) => {
                info!(
                    role = %role.name,
                    detail_id = %detail_id,
                    "role created from system code detail"
                );
                Ok(RoleProvisioningOutcome::Created(role))
            }
            Err(e) => {
                error!(role = %data.name, error = %e, "error creating role");
                Err(RoleProvisioningError::RoleCreation {
                    role: data.name,
                    reasons: e.to_string(),
                })
            }
        }
    }
}
