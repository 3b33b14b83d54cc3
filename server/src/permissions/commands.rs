//! Command access evaluation.

use gk_common::{ApplicationCommand, CommandRequirement, GuildPermissions, Snowflake};

/// Check whether a user may run a command.
///
/// Rules:
/// 1. Guild owner may run everything
/// 2. Administrator may run everything
/// 3. A command with no declared requirement, or the `"0"` sentinel, is
///    locked to the two bypasses above
/// 4. Otherwise every required bit must be held
#[must_use]
pub fn can_run_command(
    user_id: Snowflake,
    command: &ApplicationCommand,
    user_permissions: GuildPermissions,
    guild_owner_id: Snowflake,
) -> bool {
    if user_id == guild_owner_id || user_permissions.is_administrator() {
        return true;
    }

    match command.requirement() {
        CommandRequirement::Undeclared | CommandRequirement::NoneRequired => false,
        CommandRequirement::Requires(required) => user_permissions.has_all(required),
    }
}
