//! Discord API access.
//!
//! [`DiscordApi`] is the seam between permission logic and the network: the
//! manager only ever sees snapshots returned through it.

pub mod client;

use async_trait::async_trait;
use gk_common::{
    ApplicationCommand, Channel, CommandPermission, Guild, GuildMember, Role, Snowflake, User,
};
use thiserror::Error;

pub use client::HttpDiscordClient;

/// Errors returned by a [`DiscordApi`] implementation.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// Upstream answered 404 for the resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A read answered with any other non-success status.
    #[error("Discord request failed ({status}): {body}")]
    Failed { status: u16, body: String },

    /// A write answered with any non-success status other than 404.
    #[error("Discord rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// Transport or decoding failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for Discord API calls.
pub type DiscordResult<T> = Result<T, DiscordError>;

/// Read and write operations the permission manager needs from Discord.
///
/// Each call is one request/response. Implementations own credentials and
/// any timeout policy.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// The user the configured bearer token belongs to.
    async fn fetch_current_user(&self) -> DiscordResult<User>;

    async fn fetch_guild(&self, guild_id: Snowflake) -> DiscordResult<Guild>;

    async fn fetch_roles(&self, guild_id: Snowflake) -> DiscordResult<Vec<Role>>;

    async fn fetch_channels(&self, guild_id: Snowflake) -> DiscordResult<Vec<Channel>>;

    async fn fetch_commands(
        &self,
        application_id: Snowflake,
        guild_id: Snowflake,
    ) -> DiscordResult<Vec<ApplicationCommand>>;

    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> DiscordResult<GuildMember>;

    /// Fails with [`DiscordError::NotFound`] when the command has never had
    /// overrides configured.
    async fn fetch_command_permissions(
        &self,
        application_id: Snowflake,
        guild_id: Snowflake,
        command_id: Snowflake,
    ) -> DiscordResult<Vec<CommandPermission>>;

    /// Replace the command's whole override list.
    async fn put_command_permissions(
        &self,
        application_id: Snowflake,
        guild_id: Snowflake,
        command_id: Snowflake,
        permissions: &[CommandPermission],
    ) -> DiscordResult<()>;
}
