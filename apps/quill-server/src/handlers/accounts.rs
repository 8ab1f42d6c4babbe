//! Registration, sign-in and sign-out.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::User;
use quill_core::forms::{LoginForm, RegistrationForm};
use quill_core::services::Submission;
use quill_shared::dto::{LoginView, RegistrationView};

use super::flash::Flash;
use super::respond::{invalid, redirect, render, safe_next};
use crate::middleware::auth::{OptionalIdentity, session_cookie, session_removal};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NextParams {
    pub next: Option<String>,
}

/// Issue a session for `user` and redirect to `location`.
fn sign_in(
    state: &AppState,
    user: &User,
    location: &str,
    notice: Option<Flash>,
) -> AppResult<HttpResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.username, user.roles())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut response = HttpResponse::Found();
    response
        .insert_header((header::LOCATION, location))
        .cookie(session_cookie(
            token,
            state.tokens.expiration_seconds(),
            state.secure_cookies,
        ));
    if let Some(notice) = notice {
        response.cookie(notice.cookie());
    }

    Ok(response.finish())
}

/// GET /register/
pub async fn register_form(req: HttpRequest, identity: OptionalIdentity) -> HttpResponse {
    if identity.0.is_some() {
        return redirect("/", None);
    }
    render(&req, RegistrationView::default())
}

/// POST /register/
///
/// A successful registration signs the new user in.
pub async fn register(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<RegistrationForm>,
) -> AppResult<HttpResponse> {
    if identity.0.is_some() {
        return Ok(redirect("/", None));
    }

    match state.accounts.register(&form).await? {
        Submission::Accepted(user) => sign_in(&state, &user, "/", Some(Flash::Welcome)),
        Submission::Rejected(errors) => Ok(invalid(
            RegistrationView {
                username: form.username.clone(),
            },
            errors,
        )),
    }
}

/// GET /login/
pub async fn login_form(req: HttpRequest, params: web::Query<NextParams>) -> HttpResponse {
    render(
        &req,
        LoginView {
            username: String::new(),
            next: params.into_inner().next,
        },
    )
}

/// POST /login/
pub async fn login(
    state: web::Data<AppState>,
    params: web::Query<NextParams>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let next = params.into_inner().next;

    match state.accounts.authenticate(&form).await? {
        Submission::Accepted(user) => {
            tracing::info!(username = %user.username, "User signed in");
            sign_in(&state, &user, safe_next(next.as_deref()), None)
        }
        Submission::Rejected(errors) => Ok(invalid(
            LoginView {
                username: form.username.clone(),
                next,
            },
            errors,
        )),
    }
}

/// POST /logout/
pub async fn logout(identity: OptionalIdentity) -> HttpResponse {
    if let Some(identity) = &identity.0 {
        tracing::info!(username = %identity.username, "User signed out");
    }

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_removal())
        .finish()
}
