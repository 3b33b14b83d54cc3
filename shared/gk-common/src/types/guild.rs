//! Guild, Role, and Member Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::permissions::GuildPermissions;
use super::snowflake::Snowflake;

/// Guild summary. Only the fields permission checks depend on are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    /// Guild ID. Also the id of the guild's @everyone role.
    pub id: Snowflake,
    /// Guild name.
    #[serde(default)]
    pub name: String,
    /// Owner's user ID. The owner bypasses every permission check.
    pub owner_id: Snowflake,
}

/// Guild role with permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    #[serde(default)]
    pub name: String,
    pub permissions: GuildPermissions,
    /// Hierarchy key. Higher number = higher rank.
    pub position: i32,
    /// Whether an integration manages this role.
    #[serde(default)]
    pub managed: bool,
}

impl Role {
    /// Whether this is the guild's @everyone role.
    #[must_use]
    pub fn is_everyone(&self, guild_id: Snowflake) -> bool {
        self.id == guild_id
    }
}

/// User (public information).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// A user's membership in a guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMember {
    /// Absent in some gateway payloads; always present from the REST member endpoint.
    #[serde(default)]
    pub user: Option<User>,
    /// Assigned role IDs. Never includes @everyone.
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl GuildMember {
    #[must_use]
    pub fn user_id(&self) -> Option<Snowflake> {
        self.user.as_ref().map(|u| u.id)
    }

    #[must_use]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.roles.contains(&role_id)
    }
}
