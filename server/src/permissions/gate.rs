//! Authorization gate for command permission edits.
//!
//! Changing who may run a command is itself an administrative action, so it
//! is held to a higher floor than running the command.

use gk_common::{ApplicationCommand, GuildPermissions, Snowflake};
use thiserror::Error;

use super::commands::can_run_command;
use super::context::MemberPermissionContext;

/// Permission check errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Actor lacks base capabilities. Carries only the missing bits.
    #[error("Missing permissions: {0:?}")]
    MissingPermissions(GuildPermissions),

    /// Actor could not run the command whose overrides they tried to edit.
    #[error("You cannot run command {command_id}, so you cannot change who may run it")]
    CannotRunCommand { command_id: Snowflake },
}

/// Check that the actor may edit `command`'s permission overrides.
///
/// Rules:
/// 1. Guild owner and Administrator pass
/// 2. Otherwise both Manage Guild and Manage Roles are required
/// 3. Then the actor must be able to run the command themself
pub fn authorize_command_permission_edit(
    ctx: &MemberPermissionContext,
    command: &ApplicationCommand,
) -> Result<(), PermissionError> {
    if ctx.is_privileged() {
        return Ok(());
    }

    ctx.require_permission(GuildPermissions::OVERRIDE_EDITOR)?;

    if !can_run_command(ctx.user_id, command, ctx.base_permissions, ctx.guild_owner_id) {
        return Err(PermissionError::CannotRunCommand {
            command_id: command.id,
        });
    }

    Ok(())
}
