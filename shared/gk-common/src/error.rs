//! Common Error Types

use thiserror::Error;

/// Errors raised while decoding shared wire types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A snowflake id was not a valid unsigned 64-bit decimal.
    #[error("Invalid snowflake: {0}")]
    InvalidSnowflake(String),

    /// A permission bitfield was not a valid unsigned 64-bit decimal.
    #[error("Invalid permission bitfield: {0}")]
    InvalidPermissions(String),

    /// An overwrite type discriminant outside the known set.
    #[error("Unknown overwrite type: {0}")]
    UnknownOverwriteType(u8),

    /// A command permission type discriminant outside the known set.
    #[error("Unknown command permission type: {0}")]
    UnknownCommandPermissionType(u8),
}

/// Result alias for common operations.
pub type Result<T> = std::result::Result<T, Error>;
