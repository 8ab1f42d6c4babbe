//! Data Transfer Objects - the view models each page renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user, if any, as shown to templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: Option<CategoryView>,
    pub content: String,
    pub excerpt: String,
    /// Path relative to the media root.
    pub featured_image: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// One page of a listing plus the numbers a paginator widget needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_number: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeView {
    pub posts: PageView<PostView>,
    pub categories: Vec<CategoryView>,
    pub search_query: String,
    pub category_slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailView {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    /// Comment text to show again after a failed submission.
    pub comment_form: CommentFormValues,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentFormValues {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPageView {
    pub category: CategoryView,
    pub posts: PageView<PostView>,
}

/// Values of the post create/edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFormValues {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEditorView {
    /// The post being edited; absent on the create form.
    pub post: Option<PostView>,
    pub form: PostFormValues,
    pub categories: Vec<CategoryView>,
    pub status_choices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyPostsView {
    pub user: UserView,
    pub posts: PageView<PostView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationView {
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginView {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// A comment in the staff moderation queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationCommentView {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub post_title: String,
    pub post_slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationView {
    pub comments: Vec<ModerationCommentView>,
}

/// Result of a bulk approve / unapprove action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalView {
    pub approved: bool,
    pub changed: u64,
}

/// Submitted comment ids for the bulk moderation actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentSelection {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthView {
    pub status: String,
    pub store: String,
}
