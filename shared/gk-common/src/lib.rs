//! Gatekeeper Common Library
//!
//! Discord wire types and the guild permission bitfield, shared by the
//! server and any client that talks to it.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
