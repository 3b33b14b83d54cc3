//! Pre-computed permission context for the acting member.

use gk_common::{GuildMember, GuildPermissions, Role, Snowflake};

use super::gate::PermissionError;
use super::resolver::compute_base_permissions;

/// Everything needed to run permission checks for one member against one
/// guild snapshot, without further upstream calls.
#[derive(Debug, Clone)]
pub struct MemberPermissionContext {
    /// The acting user's ID.
    pub user_id: Snowflake,

    /// The guild owner's user ID.
    pub guild_owner_id: Snowflake,

    /// Union of the member's role permissions.
    pub base_permissions: GuildPermissions,

    /// Whether this member is the guild owner.
    pub is_owner: bool,
}

impl MemberPermissionContext {
    /// Build the context from a member record and the guild's full role list.
    #[must_use]
    pub fn new(
        user_id: Snowflake,
        member: &GuildMember,
        guild_roles: &[Role],
        guild_owner_id: Snowflake,
    ) -> Self {
        Self {
            user_id,
            guild_owner_id,
            base_permissions: compute_base_permissions(member, guild_roles),
            is_owner: user_id == guild_owner_id,
        }
    }

    /// Owner or Administrator: skips every capability check.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.is_owner || self.base_permissions.is_administrator()
    }

    /// Check if the member holds every bit of `permission`.
    #[must_use]
    pub const fn has_permission(&self, permission: GuildPermissions) -> bool {
        self.is_privileged() || self.base_permissions.has_all(permission)
    }

    /// Require every bit of `permission`.
    ///
    /// The error carries only the bits that are missing.
    pub const fn require_permission(
        &self,
        permission: GuildPermissions,
    ) -> Result<(), PermissionError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(PermissionError::MissingPermissions(
                permission.subtract(self.base_permissions),
            ))
        }
    }
}
