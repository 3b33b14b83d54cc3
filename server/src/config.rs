//! Server Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::fmt;

use anyhow::{Context, Result};
use gk_common::Snowflake;

/// Default Discord REST base URL.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Discord application and credentials
    pub discord: DiscordConfig,
}

/// Discord application, guild, and credentials.
///
/// Only the HTTP client reads the tokens.
#[derive(Clone)]
pub struct DiscordConfig {
    /// REST base URL without trailing slash
    pub api_base: String,

    /// Application that owns the commands
    pub application_id: Snowflake,

    /// Guild being administered
    pub guild_id: Snowflake,

    /// Bot token for guild, role, channel, member, and command reads
    pub bot_token: String,

    /// OAuth2 bearer token of the acting user; identifies the actor and
    /// authorizes command permission reads and writes
    pub bearer_token: String,

    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("api_base", &self.api_base)
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .field("bot_token", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            discord: DiscordConfig::from_env()?,
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            discord: DiscordConfig {
                api_base: "http://127.0.0.1:9/api/v10".into(),
                application_id: Snowflake(5),
                guild_id: Snowflake(1000),
                bot_token: "test-bot-token".into(),
                bearer_token: "test-bearer-token".into(),
                request_timeout_secs: 1,
            },
        }
    }
}

impl DiscordConfig {
    /// Load the Discord section from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base: env::var("DISCORD_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            application_id: required_snowflake("DISCORD_APPLICATION_ID")?,
            guild_id: required_snowflake("DISCORD_GUILD_ID")?,
            bot_token: env::var("DISCORD_BOT_TOKEN").context("DISCORD_BOT_TOKEN must be set")?,
            bearer_token: env::var("DISCORD_BEARER_TOKEN")
                .context("DISCORD_BEARER_TOKEN must be set")?,
            request_timeout_secs: env::var("DISCORD_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

fn required_snowflake(key: &str) -> Result<Snowflake> {
    env::var(key)
        .with_context(|| format!("{key} must be set"))?
        .parse()
        .with_context(|| format!("{key} must be a numeric id"))
}
