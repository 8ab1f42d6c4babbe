//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{MediaStorage, PasswordService, TokenService};
use quill_core::services::{AccountService, BlogService, ModerationService, Repositories};
use quill_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService, LocalMediaStorage};

#[cfg(feature = "postgres")]
use quill_infra::DatabaseConnections;

use crate::config::AppConfig;

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub accounts: Arc<AccountService>,
    pub moderation: Arc<ModerationService>,
    pub tokens: Arc<dyn TokenService>,
    pub secure_cookies: bool,
    pub store: StoreKind,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database connection failed: {0}")]
    Database(String),

    #[error("staff account bootstrap failed: {0}")]
    Bootstrap(String),
}

impl AppState {
    /// Wire services over the configured store.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let media: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(&config.media_root));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        let (repos, store, db) = match &config.database {
            Some(db_config) => {
                let connections = DatabaseConnections::init(db_config)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;
                let repos = quill_infra::database::repositories(&connections.main);
                (repos, StoreKind::Postgres, Some(Arc::new(connections)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
                (InMemoryStore::new().repositories(), StoreKind::Memory, None)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repos, store) = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature; ignoring DATABASE_URL");
            }
            (InMemoryStore::new().repositories(), StoreKind::Memory)
        };

        let mut state = Self::from_parts(repos, media, passwords, tokens, config.secure_cookies);
        state.store = store;
        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }

        if let Some(admin) = &config.admin {
            state
                .accounts
                .ensure_staff(&admin.username, &admin.password)
                .await
                .map_err(|e| StartupError::Bootstrap(e.to_string()))?;
        }

        tracing::info!(store = store.as_str(), "Application state initialized");
        Ok(state)
    }

    /// Assemble state from already-built ports.
    pub fn from_parts(
        repos: Repositories,
        media: Arc<dyn MediaStorage>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            blog: Arc::new(BlogService::new(repos.clone(), media)),
            accounts: Arc::new(AccountService::new(repos.users.clone(), passwords)),
            moderation: Arc::new(ModerationService::new(repos)),
            tokens,
            secure_cookies,
            store: StoreKind::Memory,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
