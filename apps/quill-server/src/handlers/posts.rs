//! Public reading pages and post authoring.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use quill_core::forms::{CommentForm, ImageUpload, PostForm};
use quill_core::pagination::PageRequest;
use quill_core::services::{Access, CommentSubmission, ListingQuery, Submission};
use quill_shared::dto::{MyPostsView, UserView};

use super::flash::Flash;
use super::respond::{invalid, post_url, redirect, render};
use super::views;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageParams {
    #[serde(default)]
    pub filename: String,
}

fn denied(post_slug: &str, reason: &str) -> HttpResponse {
    redirect(&post_url(post_slug), Some(Flash::for_denial(reason)))
}

/// GET /
pub async fn home(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Query<ListingParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = ListingQuery {
        search: params.q.map(|q| q.trim().to_string()),
        category: params.category,
        page: PageRequest::parse(params.page.as_deref()),
    };

    let home = state.blog.home(query).await?;
    Ok(render(&req, views::home(home)))
}

/// GET /post/{slug}/
pub async fn detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let detail = state.blog.post_detail(&slug).await?;
    Ok(render(&req, views::post_detail(detail, "")))
}

/// POST /post/{slug}/
pub async fn comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    slug: web::Path<String>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let actor = identity.actor();
    let outcome = state
        .blog
        .submit_comment(actor.as_ref(), &slug, &form)
        .await?;

    Ok(match outcome {
        CommentSubmission::Created(_) => {
            redirect(&post_url(&slug), Some(Flash::CommentSubmitted))
        }
        CommentSubmission::Ignored(detail) => render(&req, views::post_detail(detail, "")),
        CommentSubmission::Rejected { detail, errors } => {
            invalid(views::post_detail(detail, &form.content), errors)
        }
    })
}

/// GET /category/{slug}/
pub async fn category(
    req: HttpRequest,
    state: web::Data<AppState>,
    slug: web::Path<String>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::parse(params.page.as_deref());
    let listing = state.blog.category_posts(&slug, page).await?;
    Ok(render(&req, views::category_page(listing)))
}

/// GET /post/create/
pub async fn create_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let editor = state.blog.new_post_form().await?;
    Ok(render(&req, views::editor(editor, None)))
}

/// POST /post/create/
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    match state.blog.create_post(&identity.actor(), &form).await? {
        Submission::Accepted(post) => Ok(redirect(&post_url(&post.slug), Some(Flash::PostCreated))),
        Submission::Rejected(errors) => {
            let editor = state.blog.new_post_form().await?;
            Ok(invalid(views::editor(editor, Some(&*form)), errors))
        }
    }
}

/// GET /post/{slug}/edit/
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    match state.blog.edit_form(&identity.actor(), &slug).await? {
        Access::Granted(editor) => Ok(render(&req, views::editor(editor, None))),
        Access::Denied { post_slug, reason } => Ok(denied(&post_slug, reason)),
    }
}

/// POST /post/{slug}/edit/
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let actor = identity.actor();
    match state.blog.edit_post(&actor, &slug, &form).await? {
        Access::Granted(Submission::Accepted(post)) => {
            Ok(redirect(&post_url(&post.slug), Some(Flash::PostUpdated)))
        }
        Access::Granted(Submission::Rejected(errors)) => {
            match state.blog.edit_form(&actor, &slug).await? {
                Access::Granted(editor) => Ok(invalid(views::editor(editor, Some(&*form)), errors)),
                Access::Denied { post_slug, reason } => Ok(denied(&post_slug, reason)),
            }
        }
        Access::Denied { post_slug, reason } => Ok(denied(&post_slug, reason)),
    }
}

/// GET /post/{slug}/delete/
pub async fn delete_confirm(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    match state.blog.delete_confirmation(&identity.actor(), &slug).await? {
        Access::Granted(entry) => Ok(render(&req, views::post_entry(entry))),
        Access::Denied { post_slug, reason } => Ok(denied(&post_slug, reason)),
    }
}

/// POST /post/{slug}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    match state.blog.delete_post(&identity.actor(), &slug).await? {
        Access::Granted(_) => Ok(redirect("/", Some(Flash::PostDeleted))),
        Access::Denied { post_slug, reason } => Ok(denied(&post_slug, reason)),
    }
}

/// POST /post/{slug}/image/?filename=...
///
/// The request body is the raw image file.
pub async fn upload_image(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
    params: web::Query<ImageParams>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let actor = identity.actor();
    let upload = ImageUpload {
        filename: &params.filename,
        bytes: &body,
    };

    match state.blog.attach_image(&actor, &slug, upload).await? {
        Access::Granted(Submission::Accepted(post)) => {
            Ok(redirect(&post_url(&post.slug), Some(Flash::PostUpdated)))
        }
        Access::Granted(Submission::Rejected(errors)) => {
            match state.blog.edit_form(&actor, &slug).await? {
                Access::Granted(editor) => Ok(invalid(views::editor(editor, None), errors)),
                Access::Denied { post_slug, reason } => Ok(denied(&post_slug, reason)),
            }
        }
        Access::Denied { post_slug, reason } => Ok(denied(&post_slug, reason)),
    }
}

/// GET /my-posts/
pub async fn my_posts(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let actor = identity.actor();
    let page = PageRequest::parse(params.page.as_deref());
    let posts = state.blog.user_posts(&actor, page).await?;

    Ok(render(
        &req,
        MyPostsView {
            user: UserView {
                id: actor.user_id,
                username: actor.username,
                is_staff: actor.is_staff,
            },
            posts: views::page(posts, views::post_entry),
        },
    ))
}
