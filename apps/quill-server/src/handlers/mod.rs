//! HTTP handlers and route configuration.

mod accounts;
mod admin;
mod flash;
mod health;
mod posts;
mod respond;
mod views;


use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};

/// Largest accepted featured image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Configure all application routes.
///
/// `/post/create/` is registered ahead of `/post/{slug}/` so it is never
/// taken for a slug.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::home))
        .route("/health", web::get().to(health::health_check))
        // Posts
        .service(
            web::resource("/post/create/")
                .route(web::get().to(posts::create_form))
                .route(web::post().to(posts::create)),
        )
        .service(
            web::resource("/post/{slug}/")
                .route(web::get().to(posts::detail))
                .route(web::post().to(posts::comment)),
        )
        .service(
            web::resource("/post/{slug}/edit/")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::edit)),
        )
        .service(
            web::resource("/post/{slug}/delete/")
                .route(web::get().to(posts::delete_confirm))
                .route(web::post().to(posts::delete)),
        )
        .service(
            web::resource("/post/{slug}/image/")
                .app_data(web::PayloadConfig::new(MAX_IMAGE_BYTES))
                .route(web::post().to(posts::upload_image)),
        )
        .route("/category/{slug}/", web::get().to(posts::category))
        .route("/my-posts/", web::get().to(posts::my_posts))
        // Accounts
        .service(
            web::resource("/register/")
                .route(web::get().to(accounts::register_form))
                .route(web::post().to(accounts::register)),
        )
        .service(
            web::resource("/login/")
                .route(web::get().to(accounts::login_form))
                .route(web::post().to(accounts::login)),
        )
        .route("/logout/", web::post().to(accounts::logout))
        // Staff administration
        .service(
            web::scope("/admin")
                .route("/comments/", web::get().to(admin::comments))
                .route("/comments/approve/", web::post().to(admin::approve))
                .route("/comments/unapprove/", web::post().to(admin::unapprove))
                .route("/categories/", web::post().to(admin::create_category))
                .route(
                    "/categories/{slug}/delete/",
                    web::post().to(admin::delete_category),
                ),
        );
}

/// Fallback for unmatched paths.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No page at '{}'", req.path())))
}
