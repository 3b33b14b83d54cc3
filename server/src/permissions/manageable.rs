//! Manageable resource calculation.
//!
//! Works out which roles, channels, and commands an actor may administer,
//! e.g. to populate a configuration UI.

use gk_common::{ApplicationCommand, Channel, GuildMember, GuildPermissions, Role, Snowflake};
use serde::Serialize;

use super::commands::can_run_command;
use super::resolver::{
    compute_base_permissions, compute_channel_permissions, has_channel_manage_access,
};

/// Resources an actor is entitled to view and administer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManageableResources {
    pub roles: Vec<Role>,
    pub channels: Vec<Channel>,
    pub commands: Vec<ApplicationCommand>,
}

/// Roles the member may manage.
///
/// The owner manages every role. Anyone else manages the roles strictly
/// below their highest role that carries Manage Roles or Administrator.
#[must_use]
pub fn manageable_roles(
    user_id: Snowflake,
    member: &GuildMember,
    guild_roles: &[Role],
    guild_owner_id: Snowflake,
) -> Vec<Role> {
    if user_id == guild_owner_id {
        return guild_roles.to_vec();
    }

    let Some(ceiling) = guild_roles
        .iter()
        .filter(|role| member.has_role(role.id))
        .filter(|role| role.permissions.has_any(GuildPermissions::ROLE_MANAGER))
        .map(|role| role.position)
        .max()
    else {
        return Vec::new();
    };

    guild_roles
        .iter()
        .filter(|role| role.position < ceiling)
        .cloned()
        .collect()
}

/// Channels the member may manage.
///
/// Guild-wide Manage Channels or Administrator covers every channel;
/// otherwise each channel's overwrites decide.
#[must_use]
pub fn manageable_channels(
    user_id: Snowflake,
    member: &GuildMember,
    channels: &[Channel],
    guild_roles: &[Role],
    guild_id: Snowflake,
    guild_owner_id: Snowflake,
) -> Vec<Channel> {
    let base = compute_base_permissions(member, guild_roles);
    if has_channel_manage_access(base) {
        return channels.to_vec();
    }

    channels
        .iter()
        .filter(|channel| {
            has_channel_manage_access(compute_channel_permissions(
                user_id,
                member,
                channel,
                guild_roles,
                guild_id,
                guild_owner_id,
            ))
        })
        .cloned()
        .collect()
}

/// Commands the user may run, and therefore configure.
#[must_use]
pub fn manageable_commands(
    user_id: Snowflake,
    commands: &[ApplicationCommand],
    user_permissions: GuildPermissions,
    guild_owner_id: Snowflake,
) -> Vec<ApplicationCommand> {
    commands
        .iter()
        .filter(|command| can_run_command(user_id, command, user_permissions, guild_owner_id))
        .cloned()
        .collect()
}

/// Combine the three views for one member and one guild snapshot.
///
/// `user_id` is the acting user; every view keys ownership and member
/// overwrites on it rather than on the member payload.
#[must_use]
pub fn compute_manageable_resources(
    user_id: Snowflake,
    member: &GuildMember,
    guild_roles: &[Role],
    channels: &[Channel],
    commands: &[ApplicationCommand],
    guild_id: Snowflake,
    guild_owner_id: Snowflake,
) -> ManageableResources {
    let base = compute_base_permissions(member, guild_roles);

    ManageableResources {
        roles: manageable_roles(user_id, member, guild_roles, guild_owner_id),
        channels: manageable_channels(
            user_id,
            member,
            channels,
            guild_roles,
            guild_id,
            guild_owner_id,
        ),
        commands: manageable_commands(user_id, commands, base, guild_owner_id),
    }
}
