//! Permission system.
//!
//! Layers, leaf first:
//! - Resolver: role aggregation and channel overwrite resolution
//! - Commands: who may run an application command
//! - Manageable: roles, channels, and commands an actor may administer
//! - Gate: precondition for editing a command's permission overrides

pub mod commands;
pub mod context;
pub mod gate;
pub mod manageable;
pub mod overrides;
pub mod resolver;

pub use commands::can_run_command;
pub use context::MemberPermissionContext;
pub use gate::{authorize_command_permission_edit, PermissionError};
pub use gk_common::GuildPermissions;
pub use manageable::{
    compute_manageable_resources, manageable_channels, manageable_commands, manageable_roles,
    ManageableResources,
};
pub use overrides::{merge_command_permissions, remove_command_permission};
pub use resolver::{
    compute_base_permissions, compute_channel_permissions, has_channel_manage_access,
};
