//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod media;
mod rate_limit;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use media::{MediaError, MediaStorage};
pub use rate_limit::{RateLimitResult, RateLimiter};
pub use repository::{
    BaseRepository, CategoryRepository, CommentFilter, CommentRepository, PostFilter,
    PostRepository, UserRepository,
};
