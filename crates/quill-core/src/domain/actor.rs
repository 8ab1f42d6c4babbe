use uuid::Uuid;

use super::post::Post;
use super::user::{ROLE_STAFF, User};

/// The authenticated user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
}

impl Actor {
    pub fn new(user_id: Uuid, username: impl Into<String>, is_staff: bool) -> Self {
        Self {
            user_id,
            username: username.into(),
            is_staff,
        }
    }

    /// Build an actor from the roles stored in a session.
    pub fn from_roles(user_id: Uuid, username: impl Into<String>, roles: &[String]) -> Self {
        Self::new(user_id, username, roles.iter().any(|r| r == ROLE_STAFF))
    }

    /// Authors may manage their own posts; staff may manage any post.
    pub fn can_manage(&self, post: &Post) -> bool {
        self.is_staff || post.author_id == self.user_id
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone(), user.is_staff)
    }
}
