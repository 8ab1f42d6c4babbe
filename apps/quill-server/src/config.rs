//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;

use quill_infra::JwtConfig;
use quill_infra::database::DatabaseConfig;

#[cfg(feature = "rate-limit")]
use quill_infra::RateLimitConfig;

/// Credentials for the staff account created at startup.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub media_root: PathBuf,
    pub secure_cookies: bool,
    pub admin: Option<AdminBootstrap>,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let admin = match (
            env::var("QUILL_ADMIN_USERNAME").ok().filter(|v| !v.is_empty()),
            env::var("QUILL_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(username), Some(password)) => Some(AdminBootstrap { username, password }),
            (Some(_), None) => {
                tracing::warn!("QUILL_ADMIN_USERNAME set without QUILL_ADMIN_PASSWORD; skipping");
                None
            }
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./media")),
            secure_cookies: env::var("SECURE_COOKIES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            admin,
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
