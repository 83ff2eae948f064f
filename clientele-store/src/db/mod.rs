//! Database layer - connection pool, schema lifecycle, and repositories
//!
//! # Design Principles
//!
//! - One pool, opened at startup and closed at shutdown - no per-call connections
//! - Joined reads use LEFT JOIN and group in Rust, so phoneless customers stay visible
//! - Rely on DB constraints and classify violations - no check-then-insert
//! - No explicit multi-statement transactions; each statement auto-commits

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{connect, create_pool};
pub use repos::*;
