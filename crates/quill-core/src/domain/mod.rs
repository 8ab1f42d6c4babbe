//! Domain entities - the core business objects.

mod actor;
mod category;
mod comment;
mod post;
pub mod slug;
mod user;

pub use actor::Actor;
pub use category::{Category, CategoryDraft};
pub use comment::{Comment, CommentEntry};
pub use post::{Post, PostDraft, PostEntry, PostStatus, UnknownStatus, listing_order};
pub use user::User;
