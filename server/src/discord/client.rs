//! reqwest-backed [`DiscordApi`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use gk_common::{
    ApplicationCommand, Channel, CommandPermission, Guild, GuildCommandPermissions, GuildMember,
    Role, Snowflake, User,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use super::{DiscordApi, DiscordError, DiscordResult};
use crate::config::DiscordConfig;

/// Which credential a request is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credential {
    Bot,
    Bearer,
}

/// Body for replacing a command's override list.
#[derive(Serialize)]
struct PutCommandPermissions<'a> {
    permissions: &'a [CommandPermission],
}

/// Discord REST client.
///
/// Guild, role, channel, member, and command reads use the bot token. The
/// current-user lookup and command permission reads and writes use the
/// acting user's bearer token.
#[derive(Clone)]
pub struct HttpDiscordClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    bearer_token: String,
}

impl HttpDiscordClient {
    /// Build a client from configuration.
    pub fn new(config: &DiscordConfig) -> DiscordResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn authorization(&self, credential: Credential) -> String {
        match credential {
            Credential::Bot => format!("Bot {}", self.bot_token),
            Credential::Bearer => format!("Bearer {}", self.bearer_token),
        }
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        credential: Credential,
    ) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, self.authorization(credential))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Credential,
    ) -> DiscordResult<T> {
        debug!("GET {}", path);
        let response = self
            .request(reqwest::Method::GET, path, credential)
            .send()
            .await?;
        let response = check_status(path, response).await?;
        Ok(response.json().await?)
    }
}

/// Map non-success statuses onto [`DiscordError`].
///
/// 404 is [`DiscordError::NotFound`]; anything else is
/// [`DiscordError::Failed`]. Writes turn the latter into `Rejected`.
async fn check_status(path: &str, response: Response) -> DiscordResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(DiscordError::NotFound(path.to_string()));
    }

    error!("Discord request failed: {} {} - {}", path, status, body);
    Err(DiscordError::Failed {
        status: status.as_u16(),
        body,
    })
}

fn command_permissions_path(
    application_id: Snowflake,
    guild_id: Snowflake,
    command_id: Snowflake,
) -> String {
    format!("/applications/{application_id}/guilds/{guild_id}/commands/{command_id}/permissions")
}

#[async_trait]
impl DiscordApi for HttpDiscordClient {
    async fn fetch_current_user(&self) -> DiscordResult<User> {
        self.get("/users/@me", Credential::Bearer).await
    }

    async fn fetch_guild(&self, guild_id: Snowflake) -> DiscordResult<Guild> {
        self.get(&format!("/guilds/{guild_id}"), Credential::Bot)
            .await
    }

    async fn fetch_roles(&self, guild_id: Snowflake) -> DiscordResult<Vec<Role>> {
        self.get(&format!("/guilds/{guild_id}/roles"), Credential::Bot)
            .await
    }

    async fn fetch_channels(&self, guild_id: Snowflake) -> DiscordResult<Vec<Channel>> {
        self.get(&format!("/guilds/{guild_id}/channels"), Credential::Bot)
            .await
    }

    async fn fetch_commands(
        &self,
        application_id: Snowflake,
        guild_id: Snowflake,
    ) -> DiscordResult<Vec<ApplicationCommand>> {
        self.get(
            &format!("/applications/{application_id}/guilds/{guild_id}/commands"),
            Credential::Bot,
        )
        .await
    }

    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> DiscordResult<GuildMember> {
        self.get(
            &format!("/guilds/{guild_id}/members/{user_id}"),
            Credential::Bot,
        )
        .await
    }

    async fn fetch_command_permissions(
        &self,
        application_id: Snowflake,
        guild_id: Snowflake,
        command_id: Snowflake,
    ) -> DiscordResult<Vec<CommandPermission>> {
        let path = command_permissions_path(application_id, guild_id, command_id);
        let envelope: GuildCommandPermissions = self.get(&path, Credential::Bearer).await?;
        Ok(envelope.permissions)
    }

    async fn put_command_permissions(
        &self,
        application_id: Snowflake,
        guild_id: Snowflake,
        command_id: Snowflake,
        permissions: &[CommandPermission],
    ) -> DiscordResult<()> {
        let path = command_permissions_path(application_id, guild_id, command_id);
        debug!("PUT {} ({} entries)", path, permissions.len());

        let response = self
            .request(reqwest::Method::PUT, &path, Credential::Bearer)
            .json(&PutCommandPermissions { permissions })
            .send()
            .await?;
        check_status(&path, response).await.map_err(|e| match e {
            DiscordError::Failed { status, body } => DiscordError::Rejected { status, body },
            other => other,
        })?;
        Ok(())
    }
}
