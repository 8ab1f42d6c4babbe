use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::slugify;

/// Category entity - groups posts under a shared heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
}

impl Category {
    /// Create a category, deriving the slug from the name when none is given.
    pub fn new(draft: CategoryDraft) -> Self {
        let slug = draft.slug.unwrap_or_else(|| slugify(&draft.name));
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            slug,
            description: draft.description,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_derived_from_name() {
        let category = Category::new(CategoryDraft {
            name: "Web Development".to_string(),
            slug: None,
            description: String::new(),
        });
        assert_eq!(category.slug, "web-development");
    }

    #[test]
    fn test_explicit_slug_kept() {
        let category = Category::new(CategoryDraft {
            name: "Technology".to_string(),
            slug: Some("tech".to_string()),
            description: "Tech posts".to_string(),
        });
        assert_eq!(category.slug, "tech");
        assert_eq!(category.description, "Tech posts");
    }
}
