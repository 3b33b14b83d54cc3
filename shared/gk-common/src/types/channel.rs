//! Channel and Permission Overwrite Types

use serde::{Deserialize, Serialize};

use super::permissions::GuildPermissions;
use super::snowflake::Snowflake;
use crate::error::Error;

/// Wire discriminant of a channel permission overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OverwriteType {
    /// Applies to a role (the @everyone role included).
    Role,
    /// Applies to a single member.
    Member,
}

impl TryFrom<u8> for OverwriteType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Role),
            1 => Ok(Self::Member),
            other => Err(Error::UnknownOverwriteType(other)),
        }
    }
}

impl From<OverwriteType> for u8 {
    fn from(value: OverwriteType) -> Self {
        match value {
            OverwriteType::Role => 0,
            OverwriteType::Member => 1,
        }
    }
}

/// Who an overwrite applies to, resolved against the owning guild.
///
/// The three variants are the three layers of channel permission
/// resolution, so every overwrite lands in exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverwriteSubject {
    /// The guild-wide default subject (@everyone). At most one per channel.
    Everyone,
    Role(Snowflake),
    Member(Snowflake),
}

/// Channel permission overwrite as sent by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverwrite {
    /// Role or user ID, depending on `kind`.
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: OverwriteType,
    pub allow: GuildPermissions,
    pub deny: GuildPermissions,
}

impl PermissionOverwrite {
    #[must_use]
    pub const fn role(id: Snowflake, allow: GuildPermissions, deny: GuildPermissions) -> Self {
        Self {
            id,
            kind: OverwriteType::Role,
            allow,
            deny,
        }
    }

    #[must_use]
    pub const fn member(id: Snowflake, allow: GuildPermissions, deny: GuildPermissions) -> Self {
        Self {
            id,
            kind: OverwriteType::Member,
            allow,
            deny,
        }
    }

    /// Classify this overwrite. A role overwrite whose id is the guild id
    /// targets @everyone.
    #[must_use]
    pub fn subject(&self, guild_id: Snowflake) -> OverwriteSubject {
        match self.kind {
            OverwriteType::Role if self.id == guild_id => OverwriteSubject::Everyone,
            OverwriteType::Role => OverwriteSubject::Role(self.id),
            OverwriteType::Member => OverwriteSubject::Member(self.id),
        }
    }
}

/// Guild channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw channel type (text, voice, category, thread, ...).
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub position: Option<i32>,
    /// `None` for channel kinds that do not support overwrites (threads),
    /// which is different from an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_overwrites: Option<Vec<PermissionOverwrite>>,
}
