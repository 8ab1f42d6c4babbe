//! Health check endpoint.

use actix_web::{HttpResponse, web};

use quill_shared::dto::HealthView;

use crate::state::AppState;

/// GET /health
///
/// Reports which store backs the server. With PostgreSQL the pool is pinged
/// and a failed ping yields `503` with status `degraded`.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    #[cfg(feature = "postgres")]
    {
        if let Some(db) = &state.db
            && let Err(e) = db.ping().await
        {
            tracing::warn!(error = %e, "Database ping failed");
            return HttpResponse::ServiceUnavailable().json(HealthView {
                status: "degraded".to_string(),
                store: state.store.as_str().to_string(),
            });
        }
    }

    HttpResponse::Ok().json(HealthView {
        status: "ok".to_string(),
        store: state.store.as_str().to_string(),
    })
}
