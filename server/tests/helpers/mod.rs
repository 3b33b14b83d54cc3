//! Reusable test helpers for manager and HTTP integration tests.
//!
//! Provides [`FakeDiscord`], an in-memory [`DiscordApi`] seeded with a small
//! guild, and [`TestApp`] for sending requests through the full axum router.
//!
//! ## Fixture guild
//!
//! | Role | Position | Permissions                          |
//! |------|----------|--------------------------------------|
//! | 10   | 10       | Kick Members                         |
//! | 20   | 20       | Manage Guild, Manage Roles, Kick     |
//! | 30   | 30       | Manage Guild                         |
//! | 40   | 40       | Administrator                        |
//!
//! Commands: 77 requires Kick Members, 78 declares no requirement, 79
//! requires Ban Members.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use gk_common::{
    ApplicationCommand, Channel, CommandPermission, CommandPermissionType, Guild, GuildMember,
    GuildPermissions, PermissionOverwrite, Role, Snowflake, User,
};
use gk_server::api::{create_router, AppState};
use gk_server::config::Config;
use gk_server::discord::{DiscordApi, DiscordError, DiscordResult};
use gk_server::manager::PermissionsManager;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const APPLICATION_ID: Snowflake = Snowflake(5);
pub const GUILD_ID: Snowflake = Snowflake(1000);
pub const OWNER_ID: Snowflake = Snowflake(1);
pub const MODERATOR_ID: Snowflake = Snowflake(2);
pub const HALF_MODERATOR_ID: Snowflake = Snowflake(3);
pub const ADMIN_ID: Snowflake = Snowflake(4);
pub const MEMBER_ID: Snowflake = Snowflake(6);

pub const KICK_COMMAND: Snowflake = Snowflake(77);
pub const LOCKED_COMMAND: Snowflake = Snowflake(78);
pub const BAN_COMMAND: Snowflake = Snowflake(79);

// ============================================================================
// Fake Discord
// ============================================================================

/// Mutable state behind [`FakeDiscord`].
#[derive(Default)]
pub struct FakeState {
    pub current_user: Snowflake,
    pub members: HashMap<Snowflake, Vec<Snowflake>>,
    pub overrides: HashMap<Snowflake, Vec<CommandPermission>>,
    pub puts: Vec<(Snowflake, Vec<CommandPermission>)>,
    pub reject_puts: Option<(u16, String)>,
}

/// In-memory Discord with one guild.
pub struct FakeDiscord {
    pub state: Mutex<FakeState>,
}

impl FakeDiscord {
    /// Fixture guild with `current_user` as the actor.
    pub fn new(current_user: Snowflake) -> Self {
        let members = HashMap::from([
            (OWNER_ID, vec![]),
            (MODERATOR_ID, vec![Snowflake(20)]),
            (HALF_MODERATOR_ID, vec![Snowflake(10), Snowflake(30)]),
            (ADMIN_ID, vec![Snowflake(40)]),
            (MEMBER_ID, vec![Snowflake(10)]),
        ]);

        Self {
            state: Mutex::new(FakeState {
                current_user,
                members,
                ..FakeState::default()
            }),
        }
    }

    /// Seed an existing override list for a command.
    pub fn with_overrides(self, command_id: Snowflake, overrides: Vec<CommandPermission>) -> Self {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert(command_id, overrides);
        self
    }

    /// Make every write fail with the given status and body.
    pub fn rejecting_puts(self, status: u16, body: &str) -> Self {
        self.state.lock().unwrap().reject_puts = Some((status, body.to_string()));
        self
    }

    /// Every list written so far, in order.
    pub fn puts(&self) -> Vec<(Snowflake, Vec<CommandPermission>)> {
        self.state.lock().unwrap().puts.clone()
    }

    pub fn stored(&self, command_id: Snowflake) -> Option<Vec<CommandPermission>> {
        self.state.lock().unwrap().overrides.get(&command_id).cloned()
    }
}

pub fn role(id: u64, permissions: GuildPermissions, position: i32) -> Role {
    Role {
        id: Snowflake(id),
        name: format!("role-{id}"),
        permissions,
        position,
        managed: false,
    }
}

pub fn guild_roles() -> Vec<Role> {
    vec![
        role(GUILD_ID.get(), GuildPermissions::VIEW_CHANNEL, 0),
        role(10, GuildPermissions::KICK_MEMBERS, 10),
        role(
            20,
            GuildPermissions::MANAGE_GUILD
                | GuildPermissions::MANAGE_ROLES
                | GuildPermissions::KICK_MEMBERS,
            20,
        ),
        role(30, GuildPermissions::MANAGE_GUILD, 30),
        role(40, GuildPermissions::ADMINISTRATOR, 40),
    ]
}

pub fn guild_channels() -> Vec<Channel> {
    let channel = |id: u64, overwrites: Vec<PermissionOverwrite>| Channel {
        id: Snowflake(id),
        guild_id: Some(GUILD_ID),
        name: Some(format!("channel-{id}")),
        kind: 0,
        position: Some(0),
        permission_overwrites: Some(overwrites),
    };

    vec![
        channel(500, vec![]),
        channel(
            501,
            vec![PermissionOverwrite::member(
                MEMBER_ID,
                GuildPermissions::MANAGE_CHANNELS,
                GuildPermissions::empty(),
            )],
        ),
    ]
}

pub fn guild_commands() -> Vec<ApplicationCommand> {
    let command = |id: Snowflake, name: &str, required: Option<GuildPermissions>| {
        ApplicationCommand {
            id,
            application_id: APPLICATION_ID,
            guild_id: Some(GUILD_ID),
            name: name.into(),
            description: String::new(),
            default_member_permissions: required,
        }
    };

    vec![
        command(KICK_COMMAND, "kick", Some(GuildPermissions::KICK_MEMBERS)),
        command(LOCKED_COMMAND, "setup", None),
        command(BAN_COMMAND, "ban", Some(GuildPermissions::BAN_MEMBERS)),
    ]
}

pub fn role_override(id: u64, permission: bool) -> CommandPermission {
    CommandPermission::new(Snowflake(id), CommandPermissionType::Role, permission)
}

pub fn user_override(id: u64, permission: bool) -> CommandPermission {
    CommandPermission::new(Snowflake(id), CommandPermissionType::User, permission)
}

#[async_trait]
impl DiscordApi for FakeDiscord {
    async fn fetch_current_user(&self) -> DiscordResult<User> {
        let id = self.state.lock().unwrap().current_user;
        Ok(User {
            id,
            username: format!("user-{id}"),
            global_name: None,
        })
    }

    async fn fetch_guild(&self, guild_id: Snowflake) -> DiscordResult<Guild> {
        if guild_id != GUILD_ID {
            return Err(DiscordError::NotFound(format!("/guilds/{guild_id}")));
        }
        Ok(Guild {
            id: GUILD_ID,
            name: "fixture".into(),
            owner_id: OWNER_ID,
        })
    }

    async fn fetch_roles(&self, _guild_id: Snowflake) -> DiscordResult<Vec<Role>> {
        Ok(guild_roles())
    }

    async fn fetch_channels(&self, _guild_id: Snowflake) -> DiscordResult<Vec<Channel>> {
        Ok(guild_channels())
    }

    async fn fetch_commands(
        &self,
        _application_id: Snowflake,
        _guild_id: Snowflake,
    ) -> DiscordResult<Vec<ApplicationCommand>> {
        Ok(guild_commands())
    }

    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> DiscordResult<GuildMember> {
        let roles = self
            .state
            .lock()
            .unwrap()
            .members
            .get(&user_id)
            .cloned()
            .ok_or_else(|| {
                DiscordError::NotFound(format!("/guilds/{guild_id}/members/{user_id}"))
            })?;

        Ok(GuildMember {
            user: Some(User {
                id: user_id,
                username: format!("user-{user_id}"),
                global_name: None,
            }),
            roles,
            nick: None,
            joined_at: None,
        })
    }

    async fn fetch_command_permissions(
        &self,
        _application_id: Snowflake,
        _guild_id: Snowflake,
        command_id: Snowflake,
    ) -> DiscordResult<Vec<CommandPermission>> {
        self.stored(command_id).ok_or_else(|| {
            DiscordError::NotFound(format!("/commands/{command_id}/permissions"))
        })
    }

    async fn put_command_permissions(
        &self,
        _application_id: Snowflake,
        _guild_id: Snowflake,
        command_id: Snowflake,
        permissions: &[CommandPermission],
    ) -> DiscordResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some((status, body)) = state.reject_puts.clone() {
            return Err(DiscordError::Rejected { status, body });
        }
        state.puts.push((command_id, permissions.to_vec()));
        state.overrides.insert(command_id, permissions.to_vec());
        Ok(())
    }
}

/// Manager over a fake acting as `current_user`.
pub fn manager_for(fake: &Arc<FakeDiscord>) -> PermissionsManager {
    PermissionsManager::new(fake.clone(), APPLICATION_ID, GUILD_ID)
}

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub discord: Arc<FakeDiscord>,
}

impl TestApp {
    /// Create a test app backed by `discord`.
    pub fn new(discord: FakeDiscord) -> Self {
        let discord = Arc::new(discord);
        let mut config = Config::default_for_test();
        config.discord.application_id = APPLICATION_ID;
        config.discord.guild_id = GUILD_ID;

        let state = AppState::new(discord.clone(), config);
        Self {
            router: create_router(state),
            discord,
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Build a JSON request.
    pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
        Self::request(method, uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}
