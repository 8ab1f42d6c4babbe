use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried by every authenticated session.
pub const ROLE_USER: &str = "user";
/// Role granting edit and delete rights over any post.
pub const ROLE_STAFF: &str = "staff";

/// User entity - an account that can author posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new regular (non-staff) user with generated ID and timestamps.
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn staff(mut self) -> Self {
        self.is_staff = true;
        self
    }

    /// Roles to embed in a session token for this user.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec![ROLE_USER.to_string()];
        if self.is_staff {
            roles.push(ROLE_STAFF.to_string());
        }
        roles
    }
}
