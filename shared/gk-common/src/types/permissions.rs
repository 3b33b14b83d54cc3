//! Guild-level permissions using bitflags.
//!
//! The bit layout is Discord's, and it is shared with the upstream API:
//! - General (bits 0-10): invites, moderation, administration, channel visibility
//! - Text (bits 11-18): messaging, history, mentions, emoji
//! - Voice (bits 20-25): connect, speak, member voice moderation
//! - Management (bits 26-34): nicknames, roles, webhooks, expressions, events, threads
//! - Extended (bits 35-50): threads, activities, timeouts, soundboard, polls, apps
//!
//! Bits are never reinterpreted locally. Values received from upstream keep
//! every bit, including ones this enumeration does not name yet.

use std::fmt;

use bitflags::bitflags;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

bitflags! {
    /// Guild permissions represented as a 64-bit bitfield.
    ///
    /// Transported as a decimal string because the upper bits exceed the
    /// range JSON clients can represent as numbers without precision loss.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GuildPermissions: u64 {
        // === General (bits 0-10) ===
        const CREATE_INSTANT_INVITE = 1 << 0;
        const KICK_MEMBERS          = 1 << 1;
        const BAN_MEMBERS           = 1 << 2;
        /// Grants every permission and bypasses channel overwrites
        const ADMINISTRATOR         = 1 << 3;
        /// Create, edit, and delete channels
        const MANAGE_CHANNELS       = 1 << 4;
        /// Modify guild settings
        const MANAGE_GUILD          = 1 << 5;
        const ADD_REACTIONS         = 1 << 6;
        const VIEW_AUDIT_LOG        = 1 << 7;
        const PRIORITY_SPEAKER      = 1 << 8;
        const STREAM                = 1 << 9;
        const VIEW_CHANNEL          = 1 << 10;

        // === Text (bits 11-19) ===
        const SEND_MESSAGES         = 1 << 11;
        const SEND_TTS_MESSAGES     = 1 << 12;
        /// Delete and pin messages from other members
        const MANAGE_MESSAGES       = 1 << 13;
        const EMBED_LINKS           = 1 << 14;
        const ATTACH_FILES          = 1 << 15;
        const READ_MESSAGE_HISTORY  = 1 << 16;
        const MENTION_EVERYONE      = 1 << 17;
        const USE_EXTERNAL_EMOJIS   = 1 << 18;
        const VIEW_GUILD_INSIGHTS   = 1 << 19;

        // === Voice (bits 20-25) ===
        const CONNECT               = 1 << 20;
        const SPEAK                 = 1 << 21;
        const MUTE_MEMBERS          = 1 << 22;
        const DEAFEN_MEMBERS        = 1 << 23;
        const MOVE_MEMBERS          = 1 << 24;
        const USE_VAD               = 1 << 25;

        // === Management (bits 26-34) ===
        const CHANGE_NICKNAME       = 1 << 26;
        const MANAGE_NICKNAMES      = 1 << 27;
        /// Create, edit, and delete roles below the holder's highest role
        const MANAGE_ROLES          = 1 << 28;
        const MANAGE_WEBHOOKS       = 1 << 29;
        const MANAGE_GUILD_EXPRESSIONS = 1 << 30;
        const USE_APPLICATION_COMMANDS = 1 << 31;
        const REQUEST_TO_SPEAK      = 1 << 32;
        const MANAGE_EVENTS         = 1 << 33;
        const MANAGE_THREADS        = 1 << 34;

        // === Extended (bits 35-50) ===
        const CREATE_PUBLIC_THREADS = 1 << 35;
        const CREATE_PRIVATE_THREADS = 1 << 36;
        const USE_EXTERNAL_STICKERS = 1 << 37;
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
        const USE_EMBEDDED_ACTIVITIES = 1 << 39;
        /// Time out members
        const MODERATE_MEMBERS      = 1 << 40;
        const VIEW_CREATOR_MONETIZATION_ANALYTICS = 1 << 41;
        const USE_SOUNDBOARD        = 1 << 42;
        const CREATE_GUILD_EXPRESSIONS = 1 << 43;
        const CREATE_EVENTS         = 1 << 44;
        const USE_EXTERNAL_SOUNDS   = 1 << 45;
        const SEND_VOICE_MESSAGES   = 1 << 46;
        const SEND_POLLS            = 1 << 49;
        const USE_EXTERNAL_APPS     = 1 << 50;
    }
}

impl GuildPermissions {
    // === Preset Combinations ===

    /// Capabilities required, on top of command access, to edit a command's
    /// permission overrides.
    pub const OVERRIDE_EDITOR: Self = Self::MANAGE_GUILD.union(Self::MANAGE_ROLES);

    /// Any of these grants management of a channel.
    pub const CHANNEL_MANAGER: Self = Self::MANAGE_CHANNELS.union(Self::ADMINISTRATOR);

    /// Any of these makes a role eligible to manage roles below it.
    pub const ROLE_MANAGER: Self = Self::MANAGE_ROLES.union(Self::ADMINISTRATOR);

    // === Bitmask Algebra ===

    /// Bits of `other` cleared from `self`.
    #[must_use]
    pub const fn subtract(self, other: Self) -> Self {
        Self::from_bits_retain(self.bits() & !other.bits())
    }

    /// True when `self` and `other` share at least one bit.
    #[must_use]
    pub const fn has_any(self, other: Self) -> bool {
        self.bits() & other.bits() != 0
    }

    /// True when every bit of `other` is present in `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gk_common::GuildPermissions;
    ///
    /// let perms = GuildPermissions::MANAGE_ROLES | GuildPermissions::MANAGE_GUILD;
    /// assert!(perms.has_all(GuildPermissions::MANAGE_ROLES));
    /// assert!(!perms.has_all(GuildPermissions::MANAGE_ROLES | GuildPermissions::BAN_MEMBERS));
    /// ```
    #[must_use]
    pub const fn has_all(self, other: Self) -> bool {
        self.bits() & other.bits() == other.bits()
    }

    #[must_use]
    pub const fn is_administrator(self) -> bool {
        self.has_any(Self::ADMINISTRATOR)
    }

    /// Apply one overwrite layer: remove `deny`, then add `allow`.
    #[must_use]
    pub const fn apply_overwrite(self, allow: Self, deny: Self) -> Self {
        self.subtract(deny).union(allow)
    }

    // === Wire Conversion ===

    /// Parse the upstream decimal string form, retaining unknown bits.
    pub fn from_wire(value: &str) -> Result<Self, Error> {
        value
            .trim()
            .parse::<u64>()
            .map(Self::from_bits_retain)
            .map_err(|_| Error::InvalidPermissions(value.to_string()))
    }

    /// Decimal string form sent upstream.
    #[must_use]
    pub fn to_wire(self) -> String {
        self.bits().to_string()
    }
}

impl Serialize for GuildPermissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}

struct PermissionsVisitor;

impl Visitor<'_> for PermissionsVisitor {
    type Value = GuildPermissions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a permission bitfield as a decimal string or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(GuildPermissions::from_bits_retain(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(GuildPermissions::from_bits_retain)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        GuildPermissions::from_wire(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for GuildPermissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PermissionsVisitor)
    }
}
