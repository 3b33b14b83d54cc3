//! Gatekeeper Server
//!
//! Manages who may run a Discord application's guild commands, and works out
//! which roles, channels, and commands the acting user may administer.

pub mod api;
pub mod config;
pub mod discord;
pub mod error;
pub mod manager;
pub mod permissions;
