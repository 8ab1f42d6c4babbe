//! Request logic behind every route, independent of the HTTP framework.

mod accounts;
mod blog;
mod moderation;
mod outcome;

use std::sync::Arc;

use crate::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

pub use accounts::AccountService;
pub use blog::{
    BlogService, CategoryPage, DENIED_DELETE, DENIED_EDIT, HomePage, ListingQuery, PostDetail,
    PostEditor,
};
pub use moderation::{ModerationEntry, ModerationService};
pub use outcome::{Access, CommentSubmission, Submission};

/// The set of repositories the services work against.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}
