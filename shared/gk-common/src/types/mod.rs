//! Shared Types

pub mod channel;
pub mod command;
pub mod guild;
pub mod permissions;
pub mod snowflake;

pub use channel::*;
pub use command::*;
pub use guild::*;
pub use permissions::GuildPermissions;
pub use snowflake::Snowflake;
