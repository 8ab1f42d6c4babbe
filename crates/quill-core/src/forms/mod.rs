//! Form validation layer.
//!
//! Forms hold raw submitted strings. `validate()` trims text values (never
//! passwords) and yields either typed input or field-level [`FormErrors`]
//! for re-rendering.

mod account;
mod category;
mod comment;
mod errors;
mod fields;
mod image;
mod post;

pub use account::{LoginForm, NewAccount, RegistrationForm};
pub use category::CategoryForm;
pub use comment::CommentForm;
pub use errors::FormErrors;
pub use image::ImageUpload;
pub use post::PostForm;

pub(crate) use account::USERNAME_TAKEN;
pub(crate) use post::INVALID_CATEGORY;

pub const TITLE_MAX_CHARS: usize = 200;
pub const EXCERPT_MAX_CHARS: usize = 500;
pub const COMMENT_MAX_CHARS: usize = 1000;
pub const CATEGORY_NAME_MAX_CHARS: usize = 100;
pub const USERNAME_MAX_CHARS: usize = 150;
pub const PASSWORD_MIN_CHARS: usize = 8;
