//! Command permission manager.
//!
//! Fetches guild snapshots through [`DiscordApi`], runs the pure permission
//! layers over them, and persists override lists. Every mutation passes the
//! authorization gate before anything is written.

use std::sync::Arc;

use gk_common::{CommandPermission, CommandPermissionType, Snowflake};
use tracing::{debug, info, warn};

use crate::discord::{DiscordApi, DiscordError};
use crate::error::ManagerError;
use crate::permissions::{
    authorize_command_permission_edit, compute_manageable_resources, merge_command_permissions,
    remove_command_permission, ManageableResources, MemberPermissionContext,
};

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Manages application command permission overrides for one guild.
#[derive(Clone)]
pub struct PermissionsManager {
    api: Arc<dyn DiscordApi>,
    application_id: Snowflake,
    guild_id: Snowflake,
}

impl PermissionsManager {
    #[must_use]
    pub fn new(api: Arc<dyn DiscordApi>, application_id: Snowflake, guild_id: Snowflake) -> Self {
        Self {
            api,
            application_id,
            guild_id,
        }
    }

    #[must_use]
    pub const fn application_id(&self) -> Snowflake {
        self.application_id
    }

    #[must_use]
    pub const fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    /// Current overrides for a command.
    ///
    /// A command that has never been configured has no override record
    /// upstream; that reads as an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn get_command_permissions(
        &self,
        command_id: Snowflake,
    ) -> ManagerResult<Vec<CommandPermission>> {
        match self
            .api
            .fetch_command_permissions(self.application_id, self.guild_id, command_id)
            .await
        {
            Ok(permissions) => Ok(permissions),
            Err(DiscordError::NotFound(_)) => {
                debug!("No overrides configured for command {}", command_id);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Merge `new_permissions` into the command's overrides.
    ///
    /// Entries for a subject already present are replaced. Returns the list
    /// that was written.
    #[tracing::instrument(skip(self, new_permissions), fields(count = new_permissions.len()))]
    pub async fn add_command_permissions(
        &self,
        command_id: Snowflake,
        new_permissions: &[CommandPermission],
    ) -> ManagerResult<Vec<CommandPermission>> {
        self.validate_command_permission_access(command_id).await?;

        let current = self.get_command_permissions(command_id).await?;
        let updated = merge_command_permissions(&current, new_permissions);

        self.persist(command_id, &updated).await?;
        info!(
            "Added {} override(s) to command {} ({} total)",
            new_permissions.len(),
            command_id,
            updated.len()
        );
        Ok(updated)
    }

    /// Drop the override for one subject. Absent subjects leave the list
    /// unchanged, and the unchanged list is still written back.
    #[tracing::instrument(skip(self))]
    pub async fn remove_command_permission(
        &self,
        command_id: Snowflake,
        target_id: Snowflake,
        target_kind: CommandPermissionType,
    ) -> ManagerResult<Vec<CommandPermission>> {
        self.validate_command_permission_access(command_id).await?;

        let current = self.get_command_permissions(command_id).await?;
        let updated = remove_command_permission(&current, target_id, target_kind);

        self.persist(command_id, &updated).await?;
        info!(
            "Removed override {:?} {} from command {} ({} remaining)",
            target_kind,
            target_id,
            command_id,
            updated.len()
        );
        Ok(updated)
    }

    /// Replace the command's whole override list.
    #[tracing::instrument(skip(self, permissions), fields(count = permissions.len()))]
    pub async fn set_command_permissions(
        &self,
        command_id: Snowflake,
        permissions: &[CommandPermission],
    ) -> ManagerResult<()> {
        self.validate_command_permission_access(command_id).await?;

        self.persist(command_id, permissions).await?;
        info!(
            "Replaced overrides of command {} ({} entries)",
            command_id,
            permissions.len()
        );
        Ok(())
    }

    /// Roles, channels, and commands the acting user may administer.
    #[tracing::instrument(skip(self))]
    pub async fn manageable_resources(&self) -> ManagerResult<ManageableResources> {
        let user = self.api.fetch_current_user().await?;

        let (member, roles, channels, commands, guild) = tokio::try_join!(
            self.api.fetch_member(self.guild_id, user.id),
            self.api.fetch_roles(self.guild_id),
            self.api.fetch_channels(self.guild_id),
            self.api.fetch_commands(self.application_id, self.guild_id),
            self.api.fetch_guild(self.guild_id),
        )?;
        debug!(
            "Snapshot for {}: {} roles, {} channels, {} commands",
            user.id,
            roles.len(),
            channels.len(),
            commands.len()
        );

        Ok(compute_manageable_resources(
            user.id,
            &member,
            &roles,
            &channels,
            &commands,
            self.guild_id,
            guild.owner_id,
        ))
    }

    /// Check that the acting user may edit the command's overrides.
    ///
    /// Callers can use this for early feedback; every mutation runs it again.
    #[tracing::instrument(skip(self))]
    pub async fn validate_command_permission_access(
        &self,
        command_id: Snowflake,
    ) -> ManagerResult<()> {
        let user = self.api.fetch_current_user().await?;

        let (member, roles, commands, guild) = tokio::try_join!(
            self.api.fetch_member(self.guild_id, user.id),
            self.api.fetch_roles(self.guild_id),
            self.api.fetch_commands(self.application_id, self.guild_id),
            self.api.fetch_guild(self.guild_id),
        )?;

        let command = commands
            .iter()
            .find(|c| c.id == command_id)
            .ok_or_else(|| ManagerError::NotFound(format!("command {command_id}")))?;

        let ctx = MemberPermissionContext::new(user.id, &member, &roles, guild.owner_id);
        authorize_command_permission_edit(&ctx, command).map_err(|e| {
            warn!(
                user_id = %user.id,
                command_id = %command_id,
                "Override edit denied: {}",
                e
            );
            ManagerError::AccessDenied(e)
        })
    }

    async fn persist(
        &self,
        command_id: Snowflake,
        permissions: &[CommandPermission],
    ) -> ManagerResult<()> {
        self.api
            .put_command_permissions(self.application_id, self.guild_id, command_id, permissions)
            .await?;
        Ok(())
    }
}
