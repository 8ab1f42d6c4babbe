use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Post, PostStatus, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique constraints are enforced by the store.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity (last write wins).
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, applying the store's referential actions.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Category repository. Deleting a category clears the reference on its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    /// All categories ordered by name.
    async fn list_all(&self) -> Result<Vec<Category>, RepoError>;
}

/// Criteria for post listings. Every populated field narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring over title, content or excerpt.
    pub search: Option<String>,
}

impl PostFilter {
    pub fn published() -> Self {
        Self {
            status: Some(PostStatus::Published),
            ..Self::default()
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.status.is_none_or(|s| post.status == s)
            && self.author_id.is_none_or(|a| post.author_id == a)
            && self.category_id.is_none_or(|c| post.category_id == Some(c))
            && self.search.as_deref().is_none_or(|q| post.matches_query(q))
    }
}

/// Post repository. Deleting a post deletes its comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find a post by slug regardless of status.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// One page of matching posts, newest published first, then newest created.
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<Page<Post>, RepoError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub post_id: Option<Uuid>,
    pub approved: Option<bool>,
}

impl CommentFilter {
    pub fn approved_for(post_id: Uuid) -> Self {
        Self {
            post_id: Some(post_id),
            approved: Some(true),
        }
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        self.post_id.is_none_or(|p| comment.post_id == p)
            && self.approved.is_none_or(|a| comment.approved == a)
    }
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Matching comments, oldest first.
    async fn list(&self, filter: &CommentFilter) -> Result<Vec<Comment>, RepoError>;

    /// Set the approval flag on every listed comment; returns how many changed.
    async fn set_approved(&self, ids: &[Uuid], approved: bool) -> Result<u64, RepoError>;
}
