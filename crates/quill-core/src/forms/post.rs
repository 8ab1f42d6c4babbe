use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::FormErrors;
use super::fields::{derived_slug, max_chars, optional, optional_slug, required};
use super::{EXCERPT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::domain::{Post, PostDraft, PostStatus};

pub(crate) const INVALID_CATEGORY: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Submission for creating or editing a post.
///
/// `category` is the id of an existing category or blank. Whether that id
/// exists is checked by the service, which has the repository at hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub status: String,
}

impl PostForm {
    /// Initial values for editing an existing post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            category: post.category_id.map(|id| id.to_string()).unwrap_or_default(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            status: post.status.to_string(),
        }
    }

    pub fn validate(&self) -> Result<PostDraft, FormErrors> {
        let mut errors = FormErrors::new();

        let title = required(&mut errors, "title", &self.title)
            .filter(|t| max_chars(&mut errors, "title", t, TITLE_MAX_CHARS));
        let slug = optional_slug(&mut errors, "slug", &self.slug, TITLE_MAX_CHARS);
        if let Some(title) = &title
            && optional(&self.slug).is_none()
        {
            derived_slug(
                &mut errors,
                "title",
                title,
                TITLE_MAX_CHARS,
                "Title must contain at least one letter or number.",
            );
        }

        let category_id = match optional(&self.category) {
            None => None,
            Some(raw) => match Uuid::parse_str(&raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("category", INVALID_CATEGORY);
                    None
                }
            },
        };

        let content = required(&mut errors, "content", &self.content);
        let excerpt = optional(&self.excerpt).unwrap_or_default();
        max_chars(&mut errors, "excerpt", &excerpt, EXCERPT_MAX_CHARS);

        let status = required(&mut errors, "status", &self.status).and_then(|raw| {
            raw.parse::<PostStatus>()
                .map_err(|e| {
                    errors.add(
                        "status",
                        format!("Select a valid choice. {} is not one of the available choices.", e.0),
                    )
                })
                .ok()
        });

        match (title, content, status) {
            (Some(title), Some(content), Some(status)) => errors.finish(PostDraft {
                title,
                slug,
                category_id,
                content,
                excerpt,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PostForm {
        PostForm {
            title: "Test Post".to_string(),
            content: "Test content".repeat(20),
            category: Uuid::new_v4().to_string(),
            status: "draft".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_data() {
        let draft = valid_form().validate().unwrap();
        assert_eq!(draft.title, "Test Post");
        assert_eq!(draft.status, PostStatus::Draft);
        assert!(draft.slug.is_none());
        assert!(draft.category_id.is_some());
    }

    #[test]
    fn test_empty_title() {
        let form = PostForm {
            title: "   ".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(!errors.has("content"));
    }

    #[test]
    fn test_short_content_is_accepted() {
        let form = PostForm {
            content: "Short".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_category_optional() {
        let form = PostForm {
            category: String::new(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().category_id, None);
    }

    #[test]
    fn test_malformed_category() {
        let form = PostForm {
            category: "not-a-uuid".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err().get("category"), [INVALID_CATEGORY]);
    }

    #[test]
    fn test_unknown_status() {
        let form = PostForm {
            status: "archived".to_string(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().has("status"));
    }

    #[test]
    fn test_missing_status() {
        let form = PostForm {
            status: String::new(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().has("status"));
    }

    #[test]
    fn test_long_title_and_excerpt() {
        let form = PostForm {
            title: "t".repeat(201),
            excerpt: "e".repeat(501),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("excerpt"));
    }

    #[test]
    fn test_explicit_slug() {
        let form = PostForm {
            slug: "test-post-2".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().slug.as_deref(), Some("test-post-2"));

        let bad = PostForm {
            slug: "bad slug!".to_string(),
            ..valid_form()
        };
        assert!(bad.validate().unwrap_err().has("slug"));
    }

    #[test]
    fn test_title_without_slug_material() {
        let form = PostForm {
            title: "!!!".to_string(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().has("title"));
    }

    #[test]
    fn test_transliterated_title_must_fit_slug_column() {
        let form = PostForm {
            title: "日".repeat(200),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(!errors.has("slug"));

        let with_slug = PostForm {
            slug: "daily".to_string(),
            ..form
        };
        assert_eq!(with_slug.validate().unwrap().slug.as_deref(), Some("daily"));
    }

    #[test]
    fn test_accepted_title_derives_slug_within_bound() {
        let form = PostForm {
            title: "日".repeat(60),
            ..valid_form()
        };
        let post = Post::new(Uuid::new_v4(), form.validate().unwrap());
        assert!(!post.slug.is_empty());
        assert!(post.slug.chars().count() <= TITLE_MAX_CHARS);
    }
}
