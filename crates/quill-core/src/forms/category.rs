use serde::{Deserialize, Serialize};

use super::CATEGORY_NAME_MAX_CHARS;
use super::errors::FormErrors;
use super::fields::{derived_slug, max_chars, optional, optional_slug, required};
use crate::domain::CategoryDraft;

/// Administrative submission for a new category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CategoryDraft, FormErrors> {
        let mut errors = FormErrors::new();

        let name = required(&mut errors, "name", &self.name)
            .filter(|n| max_chars(&mut errors, "name", n, CATEGORY_NAME_MAX_CHARS));
        let slug = optional_slug(&mut errors, "slug", &self.slug, CATEGORY_NAME_MAX_CHARS);
        if let Some(name) = &name
            && optional(&self.slug).is_none()
        {
            derived_slug(
                &mut errors,
                "name",
                name,
                CATEGORY_NAME_MAX_CHARS,
                "Name must contain at least one letter or number.",
            );
        }

        match name {
            Some(name) => errors.finish(CategoryDraft {
                name,
                slug,
                description: optional(&self.description).unwrap_or_default(),
            }),
            None => Err(errors),
        }
    }
}
