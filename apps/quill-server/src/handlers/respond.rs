//! Response builders shared by the page handlers.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use quill_core::forms::FormErrors;
use quill_shared::ApiResponse;

use super::flash::{self, Flash};
use super::views;

/// Render a page, consuming any pending flash notice.
pub fn render<T: Serialize>(req: &HttpRequest, data: T) -> HttpResponse {
    let pending = flash::pending(req);
    let mut response = HttpResponse::Ok();
    if req.cookie(flash::FLASH_COOKIE).is_some() {
        response.cookie(flash::removal());
    }
    response.json(ApiResponse::ok(data).with_message(pending.map(|f| f.message().to_string())))
}

/// Show a rejected form again with its errors.
pub fn invalid<T: Serialize>(data: T, errors: FormErrors) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::invalid(data, views::field_errors(errors)))
}

pub fn redirect(location: &str, notice: Option<Flash>) -> HttpResponse {
    let mut response = HttpResponse::Found();
    response.insert_header((header::LOCATION, location));
    if let Some(notice) = notice {
        response.cookie(notice.cookie());
    }
    response.finish()
}

pub fn post_url(slug: &str) -> String {
    format!("/post/{slug}/")
}

/// Only same-site paths are followed after login.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}
