//! Permission resolution logic.
//!
//! Computes effective permissions for a member in a guild/channel context.

use gk_common::{Channel, GuildMember, GuildPermissions, OverwriteSubject, Role, Snowflake};

/// Compute a member's base guild permissions.
///
/// Union of the permissions of every role in `guild_roles` the member holds.
/// Role ids the member references but `guild_roles` lacks are skipped.
/// Administrator is not special-cased here.
#[must_use]
pub fn compute_base_permissions(member: &GuildMember, guild_roles: &[Role]) -> GuildPermissions {
    guild_roles
        .iter()
        .filter(|role| member.has_role(role.id))
        .fold(GuildPermissions::empty(), |perms, role| {
            perms.union(role.permissions)
        })
}

/// Compute a member's permissions in a channel.
///
/// Resolution order:
/// 1. Guild owner gets Administrator
/// 2. Members whose base permissions include Administrator get Administrator
/// 3. Channels without an overwrite list keep the base permissions
/// 4. @everyone overwrite, then merged role overwrites, then the member overwrite
///
/// `user_id` identifies the member; the member payload's own user field is
/// not consulted. `guild_id` stands in for channels whose payload omits it.
pub fn compute_channel_permissions(
    user_id: Snowflake,
    member: &GuildMember,
    channel: &Channel,
    guild_roles: &[Role],
    guild_id: Snowflake,
    guild_owner_id: Snowflake,
) -> GuildPermissions {
    if user_id == guild_owner_id {
        return GuildPermissions::ADMINISTRATOR;
    }

    let base = compute_base_permissions(member, guild_roles);
    if base.is_administrator() {
        return GuildPermissions::ADMINISTRATOR;
    }

    let Some(overwrites) = channel.permission_overwrites.as_deref() else {
        return base;
    };

    // The @everyone overwrite shares its id with the guild.
    let guild_id = channel.guild_id.unwrap_or(guild_id);

    let mut everyone = None;
    let mut role_allow = GuildPermissions::empty();
    let mut role_deny = GuildPermissions::empty();
    let mut personal = None;

    for ovr in overwrites {
        match ovr.subject(guild_id) {
            OverwriteSubject::Everyone => everyone = Some(ovr),
            OverwriteSubject::Role(role_id) if member.has_role(role_id) => {
                role_allow |= ovr.allow;
                role_deny |= ovr.deny;
            }
            OverwriteSubject::Member(id) if id == user_id => personal = Some(ovr),
            OverwriteSubject::Role(_) | OverwriteSubject::Member(_) => {}
        }
    }

    let mut perms = base;

    if let Some(ovr) = everyone {
        perms = perms.apply_overwrite(ovr.allow, ovr.deny);
    }

    // All matching role overwrites form one layer, so the result does not
    // depend on the order roles or overwrites are listed in.
    perms = perms.apply_overwrite(role_allow, role_deny);

    if let Some(ovr) = personal {
        perms = perms.apply_overwrite(ovr.allow, ovr.deny);
    }

    perms
}

/// Whether resolved channel permissions allow managing the channel.
#[must_use]
pub const fn has_channel_manage_access(permissions: GuildPermissions) -> bool {
    permissions.has_any(GuildPermissions::CHANNEL_MANAGER)
}
