use serde::{Deserialize, Serialize};

use super::COMMENT_MAX_CHARS;
use super::errors::FormErrors;
use super::fields::{max_chars, required};

/// Submission for a new comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        match required(&mut errors, "content", &self.content) {
            Some(content) if max_chars(&mut errors, "content", &content, COMMENT_MAX_CHARS) => {
                errors.finish(content)
            }
            _ => Err(errors),
        }
    }
}
