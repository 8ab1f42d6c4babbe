use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use super::slug::slugify;

/// Visibility state of a post. Only published posts are publicly listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown post status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Post entity - a blog article owned by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub content: String,
    pub excerpt: String,
    /// Relative media path of the uploaded image, if any.
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Validated author input for creating or editing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub slug: Option<String>,
    pub category_id: Option<Uuid>,
    pub content: String,
    pub excerpt: String,
    pub status: PostStatus,
}

impl Post {
    /// Create a post owned by `author_id`.
    ///
    /// The slug is derived from the title when the draft carries none, and a
    /// post created as published is stamped immediately.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        let now = Utc::now();
        let slug = draft.slug.unwrap_or_else(|| slugify(&draft.title));
        let mut post = Self {
            id: Uuid::new_v4(),
            title: draft.title,
            slug,
            author_id,
            category_id: draft.category_id,
            content: draft.content,
            excerpt: draft.excerpt,
            featured_image: None,
            status: draft.status,
            created_at: now,
            updated_at: now,
            published_at: None,
        };
        post.stamp_publication(now);
        post
    }

    /// Apply an edit. The slug only changes when one is supplied explicitly.
    pub fn apply(&mut self, draft: PostDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        if let Some(slug) = draft.slug {
            self.slug = slug;
        }
        self.category_id = draft.category_id;
        self.content = draft.content;
        self.excerpt = draft.excerpt;
        self.status = draft.status;
        self.stamp_publication(now);
        self.touch(now);
    }

    /// Set `published_at` the first time the post is seen as published.
    /// Never moves or clears an existing timestamp.
    pub fn stamp_publication(&mut self, now: DateTime<Utc>) {
        if self.status == PostStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Case-insensitive substring match over title, content and excerpt.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.title, &self.content, &self.excerpt]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Default listing order: newest published first, unpublished posts ahead of
/// published ones, ties broken by newest created.
pub fn listing_order(a: &Post, b: &Post) -> Ordering {
    let by_published = match (a.published_at, b.published_at) {
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (x, y) => y.cmp(&x),
    };
    by_published.then_with(|| b.created_at.cmp(&a.created_at))
}

/// A post together with the related rows a listing needs.
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub post: Post,
    pub author: String,
    pub category: Option<Category>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn draft(title: &str, status: PostStatus) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            slug: None,
            category_id: None,
            content: "Some content".to_string(),
            excerpt: String::new(),
            status,
        }
    }

    #[test]
    fn test_slug_generated_from_title() {
        let post = Post::new(Uuid::new_v4(), draft("Test Post", PostStatus::Draft));
        assert_eq!(post.slug, "test-post");
    }

    #[test]
    fn test_draft_has_no_publication_time() {
        let post = Post::new(Uuid::new_v4(), draft("Draft", PostStatus::Draft));
        assert!(post.published_at.is_none());
        assert!(!post.is_published());
    }

    #[test]
    fn test_created_published_is_stamped() {
        let post = Post::new(Uuid::new_v4(), draft("Live", PostStatus::Published));
        assert!(post.published_at.is_some());
    }

    #[test]
    fn test_publication_stamp_is_set_once() {
        let mut post = Post::new(Uuid::new_v4(), draft("Draft", PostStatus::Draft));
        let first = Utc::now();
        post.apply(draft("Draft", PostStatus::Published), first);
        assert_eq!(post.published_at, Some(first));

        let later = first + Duration::hours(2);
        post.apply(draft("Draft again", PostStatus::Published), later);
        assert_eq!(post.published_at, Some(first));
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn test_unpublishing_keeps_timestamp() {
        let mut post = Post::new(Uuid::new_v4(), draft("Live", PostStatus::Published));
        let stamped = post.published_at;
        post.apply(draft("Live", PostStatus::Draft), Utc::now());
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, stamped);
    }

    #[test]
    fn test_edit_keeps_slug_unless_given() {
        let mut post = Post::new(Uuid::new_v4(), draft("Original", PostStatus::Draft));
        post.apply(draft("Renamed", PostStatus::Draft), Utc::now());
        assert_eq!(post.slug, "original");

        let mut with_slug = draft("Renamed", PostStatus::Draft);
        with_slug.slug = Some("renamed".to_string());
        post.apply(with_slug, Utc::now());
        assert_eq!(post.slug, "renamed");
    }

    #[test]
    fn test_matches_query_across_fields() {
        let mut post = Post::new(Uuid::new_v4(), draft("Rust Ownership", PostStatus::Published));
        post.excerpt = "Borrow checker basics".to_string();
        assert!(post.matches_query("ownership"));
        assert!(post.matches_query("CONTENT"));
        assert!(post.matches_query("borrow"));
        assert!(!post.matches_query("python"));
    }

    #[test]
    fn test_listing_order() {
        let author = Uuid::new_v4();
        let older = Post::new(author, draft("Older", PostStatus::Published));
        let mut newer = Post::new(author, draft("Newer", PostStatus::Published));
        newer.published_at = older.published_at.map(|t| t + Duration::minutes(5));
        let unpublished = Post::new(author, draft("Draft", PostStatus::Draft));

        let mut posts = vec![older.clone(), unpublished.clone(), newer.clone()];
        posts.sort_by(listing_order);
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Draft", "Newer", "Older"]);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert!("archived".parse::<PostStatus>().is_err());
    }
}
