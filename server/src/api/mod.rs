//! API Router and Application State
//!
//! Central routing configuration and shared state.

pub mod commands;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, discord::DiscordApi, manager::PermissionsManager};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Command permission manager for the configured guild
    pub manager: Arc<PermissionsManager>,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(api: Arc<dyn DiscordApi>, config: Config) -> Self {
        let manager = PermissionsManager::new(
            api,
            config.discord.application_id,
            config.discord.guild_id,
        );
        Self {
            manager: Arc::new(manager),
            config: Arc::new(config),
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/manageable", get(commands::get_manageable))
        .route(
            "/api/commands/{command_id}/permissions",
            get(commands::get_permissions)
                .post(commands::add_permissions)
                .put(commands::set_permissions),
        )
        .route(
            "/api/commands/{command_id}/permissions/{target_type}/{target_id}",
            delete(commands::remove_permission),
        )
        .route("/api/commands/{command_id}/access", get(commands::check_access));

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    guild_id: String,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        guild_id: state.config.discord.guild_id.to_string(),
    })
}
