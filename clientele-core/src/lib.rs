//! Settings loading for the clientele customer directory.
//!
//! # Intention
//!
//! - Read database credentials from the local settings file and hand them
//!   to the store crate as a connection URL.
//! - Keep errors structured so callers can tell a missing file from a
//!   malformed one.
//!
//! # Architectural Boundaries
//!
//! - No database code belongs here; this crate never opens a connection.

pub mod config;
pub mod error;

pub use config::DbSettings;
pub use error::{ConfigError, Result};
