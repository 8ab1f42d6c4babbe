//! Staff administration: comment moderation and categories.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use quill_core::forms::CategoryForm;
use quill_core::services::Submission;
use quill_shared::ApiResponse;
use quill_shared::dto::{ApprovalView, CommentSelection, ModerationView};

use super::respond::{invalid, render};
use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ModerationParams {
    pub approved: Option<bool>,
}

/// GET /admin/comments/?approved=
pub async fn comments(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<ModerationParams>,
) -> AppResult<HttpResponse> {
    let entries = state
        .moderation
        .list_comments(&identity.actor(), params.approved)
        .await?;

    Ok(render(
        &req,
        ModerationView {
            comments: entries.into_iter().map(views::moderation_entry).collect(),
        },
    ))
}

async fn set_approved(
    state: &AppState,
    identity: &Identity,
    selection: CommentSelection,
    approved: bool,
) -> AppResult<HttpResponse> {
    let changed = state
        .moderation
        .set_comments_approved(&identity.actor(), &selection.ids, approved)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ApprovalView { approved, changed })))
}

/// POST /admin/comments/approve/
pub async fn approve(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CommentSelection>,
) -> AppResult<HttpResponse> {
    set_approved(&state, &identity, body.into_inner(), true).await
}

/// POST /admin/comments/unapprove/
pub async fn unapprove(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CommentSelection>,
) -> AppResult<HttpResponse> {
    set_approved(&state, &identity, body.into_inner(), false).await
}

/// POST /admin/categories/
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<CategoryForm>,
) -> AppResult<HttpResponse> {
    match state.moderation.create_category(&identity.actor(), &form).await? {
        Submission::Accepted(category) => {
            Ok(HttpResponse::Created().json(ApiResponse::ok(views::category(&category))))
        }
        Submission::Rejected(errors) => Ok(invalid(form.into_inner(), errors)),
    }
}

/// POST /admin/categories/{slug}/delete/
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let category = state
        .moderation
        .delete_category(&identity.actor(), &slug)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        views::category(&category),
        format!("Category '{}' deleted.", category.name),
    )))
}
