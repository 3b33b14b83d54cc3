//! Command Permission Handlers
//!
//! HTTP surface over [`crate::manager::PermissionsManager`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gk_common::{CommandPermission, CommandPermissionType, Snowflake};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ManagerError;
use crate::permissions::ManageableResources;

/// Override list in request and response bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandPermissionsBody {
    pub permissions: Vec<CommandPermission>,
}

/// Get the command's current overrides.
///
/// GET /api/commands/{command_id}/permissions
pub async fn get_permissions(
    State(state): State<AppState>,
    Path(command_id): Path<Snowflake>,
) -> Result<Json<CommandPermissionsBody>, ManagerError> {
    let permissions = state.manager.get_command_permissions(command_id).await?;
    Ok(Json(CommandPermissionsBody { permissions }))
}

/// Merge overrides into the command's list.
///
/// POST /api/commands/{command_id}/permissions
pub async fn add_permissions(
    State(state): State<AppState>,
    Path(command_id): Path<Snowflake>,
    Json(body): Json<CommandPermissionsBody>,
) -> Result<Json<CommandPermissionsBody>, ManagerError> {
    let permissions = state
        .manager
        .add_command_permissions(command_id, &body.permissions)
        .await?;
    Ok(Json(CommandPermissionsBody { permissions }))
}

/// Replace the command's whole list.
///
/// PUT /api/commands/{command_id}/permissions
pub async fn set_permissions(
    State(state): State<AppState>,
    Path(command_id): Path<Snowflake>,
    Json(body): Json<CommandPermissionsBody>,
) -> Result<Json<CommandPermissionsBody>, ManagerError> {
    state
        .manager
        .set_command_permissions(command_id, &body.permissions)
        .await?;
    Ok(Json(body))
}

/// Remove the override for one subject.
///
/// DELETE /api/commands/{command_id}/permissions/{target_type}/{target_id}
pub async fn remove_permission(
    State(state): State<AppState>,
    Path((command_id, target_type, target_id)): Path<(Snowflake, CommandPermissionType, Snowflake)>,
) -> Result<Json<CommandPermissionsBody>, ManagerError> {
    let permissions = state
        .manager
        .remove_command_permission(command_id, target_id, target_type)
        .await?;
    Ok(Json(CommandPermissionsBody { permissions }))
}

/// Check whether the acting user may edit the command's overrides.
///
/// GET /api/commands/{command_id}/access
pub async fn check_access(
    State(state): State<AppState>,
    Path(command_id): Path<Snowflake>,
) -> Result<StatusCode, ManagerError> {
    state
        .manager
        .validate_command_permission_access(command_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Roles, channels, and commands the acting user may administer.
///
/// GET /api/manageable
pub async fn get_manageable(
    State(state): State<AppState>,
) -> Result<Json<ManageableResources>, ManagerError> {
    Ok(Json(state.manager.manageable_resources().await?))
}
