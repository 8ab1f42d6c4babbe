//! Typed results at the handler boundary.

use crate::domain::Comment;
use crate::forms::FormErrors;

use super::blog::PostDetail;

/// Outcome of an ownership-guarded operation.
///
/// Denial is not an error: the caller decides how to present it, typically by
/// sending the actor back to the post with `reason` as a notice.
#[derive(Debug)]
pub enum Access<T> {
    Granted(T),
    Denied {
        post_slug: String,
        reason: &'static str,
    },
}

impl<T> Access<T> {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Access<U> {
        match self {
            Access::Granted(value) => Access::Granted(f(value)),
            Access::Denied { post_slug, reason } => Access::Denied { post_slug, reason },
        }
    }
}

/// Outcome of a form submission.
#[derive(Debug)]
pub enum Submission<T> {
    Accepted(T),
    Rejected(FormErrors),
}

impl<T> Submission<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }
}

impl<T> From<Result<T, FormErrors>> for Submission<T> {
    fn from(result: Result<T, FormErrors>) -> Self {
        match result {
            Ok(value) => Submission::Accepted(value),
            Err(errors) => Submission::Rejected(errors),
        }
    }
}

/// Outcome of posting a comment on a published post.
#[derive(Debug)]
pub enum CommentSubmission {
    /// Stored, awaiting moderation.
    Created(Comment),
    /// Anonymous submission; nothing stored, the page is shown again.
    Ignored(PostDetail),
    Rejected {
        detail: PostDetail,
        errors: FormErrors,
    },
}
