//! Application Command Types

use serde::{Deserialize, Serialize};

use super::permissions::GuildPermissions;
use super::snowflake::Snowflake;
use crate::error::Error;

/// Guild application (slash) command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCommand {
    pub id: Snowflake,
    pub application_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Minimum permissions a member needs, as declared by the application.
    /// `null` upstream maps to `None`, the `"0"` sentinel to an empty set.
    #[serde(default)]
    pub default_member_permissions: Option<GuildPermissions>,
}

/// What a command declares about who may invoke it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRequirement {
    /// No `default_member_permissions` declared.
    Undeclared,
    /// Declared as the `"0"` sentinel.
    NoneRequired,
    /// Declared non-empty minimum.
    Requires(GuildPermissions),
}

impl ApplicationCommand {
    #[must_use]
    pub fn requirement(&self) -> CommandRequirement {
        match self.default_member_permissions {
            None => CommandRequirement::Undeclared,
            Some(p) if p.is_empty() => CommandRequirement::NoneRequired,
            Some(p) => CommandRequirement::Requires(p),
        }
    }
}

/// Subject kind of a command permission override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CommandPermissionType {
    Role,
    User,
    Channel,
}

impl TryFrom<u8> for CommandPermissionType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Role),
            2 => Ok(Self::User),
            3 => Ok(Self::Channel),
            other => Err(Error::UnknownCommandPermissionType(other)),
        }
    }
}

impl From<CommandPermissionType> for u8 {
    fn from(value: CommandPermissionType) -> Self {
        match value {
            CommandPermissionType::Role => 1,
            CommandPermissionType::User => 2,
            CommandPermissionType::Channel => 3,
        }
    }
}

/// One entry in a command's permission override list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandPermission {
    /// Role, user, or channel ID, depending on `kind`.
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: CommandPermissionType,
    /// `true` to allow, `false` to deny.
    pub permission: bool,
}

impl CommandPermission {
    #[must_use]
    pub const fn new(id: Snowflake, kind: CommandPermissionType, permission: bool) -> Self {
        Self {
            id,
            kind,
            permission,
        }
    }

    /// Whether this entry targets the same subject as `(id, kind)`.
    #[must_use]
    pub fn targets(&self, id: Snowflake, kind: CommandPermissionType) -> bool {
        self.id == id && self.kind == kind
    }
}

/// Override list for one command in one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildCommandPermissions {
    /// Command ID.
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub guild_id: Snowflake,
    pub permissions: Vec<CommandPermission>,
}
