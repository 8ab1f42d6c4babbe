//! Staff-only administration: comment moderation and categories.

use std::collections::HashMap;

use uuid::Uuid;

use super::Repositories;
use super::outcome::Submission;
use crate::domain::{Actor, Category, Comment, Post};
use crate::error::DomainError;
use crate::forms::{CategoryForm, FormErrors};
use crate::ports::CommentFilter;

/// A comment as shown in the moderation queue.
#[derive(Debug, Clone)]
pub struct ModerationEntry {
    pub comment: Comment,
    pub author: String,
    pub post_title: String,
    pub post_slug: String,
}

pub struct ModerationService {
    repos: Repositories,
}

impl ModerationService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    fn require_staff(actor: &Actor) -> Result<(), DomainError> {
        if actor.is_staff {
            Ok(())
        } else {
            tracing::warn!(actor = %actor.username, "Non-staff access to administration");
            Err(DomainError::Forbidden("staff privilege required"))
        }
    }

    /// Comments, oldest first, optionally filtered by approval state.
    pub async fn list_comments(
        &self,
        actor: &Actor,
        approved: Option<bool>,
    ) -> Result<Vec<ModerationEntry>, DomainError> {
        Self::require_staff(actor)?;

        let comments = self
            .repos
            .comments
            .list(&CommentFilter {
                post_id: None,
                approved,
            })
            .await?;

        let mut author_ids: Vec<Uuid> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<Uuid, String> = self
            .repos
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let mut posts: HashMap<Uuid, Option<Post>> = HashMap::new();
        let mut entries = Vec::with_capacity(comments.len());
        for comment in comments {
            if !posts.contains_key(&comment.post_id) {
                let post = self.repos.posts.find_by_id(comment.post_id).await?;
                posts.insert(comment.post_id, post);
            }
            let (post_title, post_slug) = posts
                .get(&comment.post_id)
                .and_then(Option::as_ref)
                .map(|p| (p.title.clone(), p.slug.clone()))
                .unwrap_or_default();

            entries.push(ModerationEntry {
                author: authors.get(&comment.author_id).cloned().unwrap_or_default(),
                post_title,
                post_slug,
                comment,
            });
        }

        Ok(entries)
    }

    /// The approve / unapprove bulk actions.
    pub async fn set_comments_approved(
        &self,
        actor: &Actor,
        ids: &[Uuid],
        approved: bool,
    ) -> Result<u64, DomainError> {
        Self::require_staff(actor)?;

        let changed = self.repos.comments.set_approved(ids, approved).await?;
        tracing::info!(
            moderator = %actor.username,
            requested = ids.len(),
            changed,
            approved,
            "Comment approval updated"
        );

        Ok(changed)
    }

    pub async fn create_category(
        &self,
        actor: &Actor,
        form: &CategoryForm,
    ) -> Result<Submission<Category>, DomainError> {
        Self::require_staff(actor)?;

        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };

        if self.repos.categories.find_by_name(&draft.name).await?.is_some() {
            let mut errors = FormErrors::new();
            errors.add("name", "Category with this Name already exists.");
            return Ok(Submission::Rejected(errors));
        }

        let category = self.repos.categories.create(Category::new(draft)).await?;
        tracing::info!(slug = %category.slug, moderator = %actor.username, "Category created");

        Ok(Submission::Accepted(category))
    }

    /// Delete a category. Its posts remain, uncategorized.
    pub async fn delete_category(&self, actor: &Actor, slug: &str) -> Result<Category, DomainError> {
        Self::require_staff(actor)?;

        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("category", slug))?;
        self.repos.categories.delete(category.id).await?;
        tracing::info!(slug = %category.slug, moderator = %actor.username, "Category deleted");

        Ok(category)
    }
}
