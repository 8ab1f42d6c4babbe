//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the database, session, and media integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services: in-memory store and local media only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT sessions + Argon2 password hashing
//! - `rate-limit` - Per-client submission throttling via governor

pub mod database;
pub mod media;
pub mod memory;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - always available
pub use database::DatabaseConfig;
pub use media::LocalMediaStorage;
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
