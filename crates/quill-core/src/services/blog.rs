//! Reading, commenting and authoring.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::Repositories;
use super::outcome::{Access, CommentSubmission, Submission};
use crate::domain::{Actor, Category, Comment, CommentEntry, Post, PostDraft, PostEntry};
use crate::error::DomainError;
use crate::forms::{CommentForm, FormErrors, INVALID_CATEGORY, ImageUpload, PostForm};
use crate::pagination::{Page, PageRequest};
use crate::ports::{CommentFilter, MediaStorage, PostFilter};

pub const DENIED_EDIT: &str = "You do not have permission to edit this post.";
pub const DENIED_DELETE: &str = "You do not have permission to delete this post.";

const IMAGE_PREFIX: &str = "posts";

/// Parameters of the public listing.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct HomePage {
    pub posts: Page<PostEntry>,
    pub categories: Vec<Category>,
    pub search_query: String,
    pub category_slug: String,
}

#[derive(Debug)]
pub struct PostDetail {
    pub post: PostEntry,
    pub comments: Vec<CommentEntry>,
}

#[derive(Debug)]
pub struct CategoryPage {
    pub category: Category,
    pub posts: Page<PostEntry>,
}

/// What the create/edit form needs to render.
#[derive(Debug)]
pub struct PostEditor {
    pub post: Option<PostEntry>,
    pub form: PostForm,
    pub categories: Vec<Category>,
}

pub struct BlogService {
    repos: Repositories,
    media: Arc<dyn MediaStorage>,
}

impl BlogService {
    pub fn new(repos: Repositories, media: Arc<dyn MediaStorage>) -> Self {
        Self { repos, media }
    }

    /// Published posts, optionally narrowed by search text and category slug.
    pub async fn home(&self, query: ListingQuery) -> Result<HomePage, DomainError> {
        let categories = self.repos.categories.list_all().await?;
        let search_query = query.search.unwrap_or_default();
        let category_slug = query.category.unwrap_or_default();

        let mut filter = PostFilter::published();
        if !search_query.is_empty() {
            filter.search = Some(search_query.clone());
        }

        let posts = if category_slug.is_empty() {
            Some(self.repos.posts.list(&filter, query.page).await?)
        } else {
            match categories.iter().find(|c| c.slug == category_slug) {
                Some(category) => {
                    filter.category_id = Some(category.id);
                    Some(self.repos.posts.list(&filter, query.page).await?)
                }
                // Unknown category slug filters everything out.
                None => None,
            }
        };
        let posts = posts.unwrap_or_else(|| Page::new(Vec::new(), query.page, 0));
        let posts = self.entries(posts, &categories).await?;

        Ok(HomePage {
            posts,
            categories,
            search_query,
            category_slug,
        })
    }

    /// A published post with its approved comments.
    pub async fn post_detail(&self, slug: &str) -> Result<PostDetail, DomainError> {
        let post = self
            .repos
            .posts
            .find_by_slug(slug)
            .await?
            .filter(Post::is_published)
            .ok_or_else(|| DomainError::not_found("post", slug))?;

        let comments = self
            .repos
            .comments
            .list(&CommentFilter::approved_for(post.id))
            .await?;
        let comments = self.comment_entries(comments).await?;

        let categories = self.repos.categories.list_all().await?;
        let post = self.entry(post, &categories).await?;

        Ok(PostDetail { post, comments })
    }

    /// Handle a comment posted on a published post.
    ///
    /// Anonymous submissions are dropped without an error and the page is
    /// shown again.
    pub async fn submit_comment(
        &self,
        actor: Option<&Actor>,
        slug: &str,
        form: &CommentForm,
    ) -> Result<CommentSubmission, DomainError> {
        let detail = self.post_detail(slug).await?;

        let Some(actor) = actor else {
            tracing::debug!(post = %slug, "Ignoring anonymous comment submission");
            return Ok(CommentSubmission::Ignored(detail));
        };

        let content = match form.validate() {
            Ok(content) => content,
            Err(errors) => return Ok(CommentSubmission::Rejected { detail, errors }),
        };

        let comment = Comment::new(detail.post.post.id, actor.user_id, content);
        let comment = self.repos.comments.create(comment).await?;
        tracing::info!(
            post = %slug,
            comment_id = %comment.id,
            author = %actor.username,
            "Comment submitted for moderation"
        );

        Ok(CommentSubmission::Created(comment))
    }

    /// Published posts in one category.
    pub async fn category_posts(
        &self,
        slug: &str,
        page: PageRequest,
    ) -> Result<CategoryPage, DomainError> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let filter = PostFilter {
            category_id: Some(category.id),
            ..PostFilter::published()
        };
        let posts = self.repos.posts.list(&filter, page).await?;
        let posts = self.entries(posts, std::slice::from_ref(&category)).await?;

        Ok(CategoryPage { category, posts })
    }

    /// Blank authoring form.
    pub async fn new_post_form(&self) -> Result<PostEditor, DomainError> {
        Ok(PostEditor {
            post: None,
            form: PostForm {
                status: crate::domain::PostStatus::Draft.to_string(),
                ..PostForm::default()
            },
            categories: self.repos.categories.list_all().await?,
        })
    }

    pub async fn create_post(
        &self,
        actor: &Actor,
        form: &PostForm,
    ) -> Result<Submission<Post>, DomainError> {
        let draft = match self.validate_post(form).await? {
            Ok(draft) => draft,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };

        let post = self.repos.posts.create(Post::new(actor.user_id, draft)).await?;
        tracing::info!(
            slug = %post.slug,
            status = %post.status,
            author = %actor.username,
            "Post created"
        );

        Ok(Submission::Accepted(post))
    }

    /// Pre-filled form for a post the actor may edit.
    pub async fn edit_form(
        &self,
        actor: &Actor,
        slug: &str,
    ) -> Result<Access<PostEditor>, DomainError> {
        let post = match self.managed_post(actor, slug, DENIED_EDIT).await? {
            Access::Granted(post) => post,
            Access::Denied { post_slug, reason } => return Ok(Access::Denied { post_slug, reason }),
        };

        let categories = self.repos.categories.list_all().await?;
        let form = PostForm::from_post(&post);
        let post = self.entry(post, &categories).await?;

        Ok(Access::Granted(PostEditor {
            post: Some(post),
            form,
            categories,
        }))
    }

    pub async fn edit_post(
        &self,
        actor: &Actor,
        slug: &str,
        form: &PostForm,
    ) -> Result<Access<Submission<Post>>, DomainError> {
        let mut post = match self.managed_post(actor, slug, DENIED_EDIT).await? {
            Access::Granted(post) => post,
            Access::Denied { post_slug, reason } => return Ok(Access::Denied { post_slug, reason }),
        };

        let draft = match self.validate_post(form).await? {
            Ok(draft) => draft,
            Err(errors) => return Ok(Access::Granted(Submission::Rejected(errors))),
        };

        post.apply(draft, Utc::now());
        let post = self.repos.posts.update(post).await?;
        tracing::info!(slug = %post.slug, status = %post.status, editor = %actor.username, "Post updated");

        Ok(Access::Granted(Submission::Accepted(post)))
    }

    /// The post to confirm deletion of.
    pub async fn delete_confirmation(
        &self,
        actor: &Actor,
        slug: &str,
    ) -> Result<Access<PostEntry>, DomainError> {
        let post = match self.managed_post(actor, slug, DENIED_DELETE).await? {
            Access::Granted(post) => post,
            Access::Denied { post_slug, reason } => return Ok(Access::Denied { post_slug, reason }),
        };

        let categories = self.repos.categories.list_all().await?;
        Ok(Access::Granted(self.entry(post, &categories).await?))
    }

    /// Delete a post and, through the store, its comments.
    pub async fn delete_post(&self, actor: &Actor, slug: &str) -> Result<Access<Post>, DomainError> {
        let access = self.managed_post(actor, slug, DENIED_DELETE).await?;
        if let Access::Granted(post) = &access {
            self.repos.posts.delete(post.id).await?;
            tracing::info!(slug = %post.slug, actor = %actor.username, "Post deleted");
        }
        Ok(access)
    }

    /// Store an uploaded featured image and attach it to the post.
    pub async fn attach_image(
        &self,
        actor: &Actor,
        slug: &str,
        upload: ImageUpload<'_>,
    ) -> Result<Access<Submission<Post>>, DomainError> {
        let mut post = match self.managed_post(actor, slug, DENIED_EDIT).await? {
            Access::Granted(post) => post,
            Access::Denied { post_slug, reason } => return Ok(Access::Denied { post_slug, reason }),
        };

        if let Err(errors) = upload.validate() {
            return Ok(Access::Granted(Submission::Rejected(errors)));
        }

        let now = Utc::now();
        let path = self
            .media
            .store(IMAGE_PREFIX, upload.filename, upload.bytes, now)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        post.featured_image = Some(path);
        post.touch(now);
        let post = self.repos.posts.update(post).await?;
        tracing::info!(slug = %post.slug, image = ?post.featured_image, "Featured image attached");

        Ok(Access::Granted(Submission::Accepted(post)))
    }

    /// Every post owned by the actor, drafts included.
    pub async fn user_posts(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> Result<Page<PostEntry>, DomainError> {
        let filter = PostFilter {
            author_id: Some(actor.user_id),
            ..PostFilter::default()
        };
        let posts = self.repos.posts.list(&filter, page).await?;
        let categories = self.repos.categories.list_all().await?;
        self.entries(posts, &categories).await
    }

    async fn managed_post(
        &self,
        actor: &Actor,
        slug: &str,
        reason: &'static str,
    ) -> Result<Access<Post>, DomainError> {
        let post = self
            .repos
            .posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("post", slug))?;

        if actor.can_manage(&post) {
            Ok(Access::Granted(post))
        } else {
            tracing::warn!(slug = %slug, actor = %actor.username, "Refused post management");
            Ok(Access::Denied {
                post_slug: post.slug,
                reason,
            })
        }
    }

    /// Form checks plus the existence check on the chosen category.
    async fn validate_post(
        &self,
        form: &PostForm,
    ) -> Result<Result<PostDraft, FormErrors>, DomainError> {
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return Ok(Err(errors)),
        };

        if let Some(category_id) = draft.category_id {
            if self.repos.categories.find_by_id(category_id).await?.is_none() {
                let mut errors = FormErrors::new();
                errors.add("category", INVALID_CATEGORY);
                return Ok(Err(errors));
            }
        }

        Ok(Ok(draft))
    }

    async fn entry(&self, post: Post, categories: &[Category]) -> Result<PostEntry, DomainError> {
        self.entries(Page::new(vec![post], PageRequest::first(), 1), categories)
            .await?
            .items
            .pop()
            .ok_or_else(|| DomainError::Internal("post entry vanished".to_string()))
    }

    /// Join authors and categories onto a page of posts.
    async fn entries(
        &self,
        page: Page<Post>,
        categories: &[Category],
    ) -> Result<Page<PostEntry>, DomainError> {
        let author_ids: Vec<Uuid> = page.items.iter().map(|p| p.author_id).collect();
        let authors = self.usernames(&author_ids).await?;
        let by_id: HashMap<Uuid, &Category> = categories.iter().map(|c| (c.id, c)).collect();

        Ok(page.map(|post| PostEntry {
            author: authors.get(&post.author_id).cloned().unwrap_or_default(),
            category: post
                .category_id
                .and_then(|id| by_id.get(&id).map(|c| (*c).clone())),
            post,
        }))
    }

    async fn comment_entries(
        &self,
        comments: Vec<Comment>,
    ) -> Result<Vec<CommentEntry>, DomainError> {
        let author_ids: Vec<Uuid> = comments.iter().map(|c| c.author_id).collect();
        let authors = self.usernames(&author_ids).await?;
        Ok(comments
            .into_iter()
            .map(|comment| CommentEntry {
                author: authors.get(&comment.author_id).cloned().unwrap_or_default(),
                comment,
            })
            .collect())
    }

    async fn usernames(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, DomainError> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self.repos.users.find_by_ids(&ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
    }
}
