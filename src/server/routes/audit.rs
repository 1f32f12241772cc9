//! Audit viewing and admin recovery endpoints
//!
//! Read-only consumers of the two audit trails, plus the per-key rate-limit
//! reset used for admin recovery. These back the admin screens and are not
//! exposed to end users.

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use tracing::{debug, error, info};

/// Configure audit routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/audit")
            .route("", web::get().to(list_audit_entries))
            .route("/security", web::get().to(list_security_incidents))
            .route("/rate-limit/{key}/reset", web::post().to(reset_rate_limit)),
    );
}

/// General chat audit trail, oldest first
pub async fn list_audit_entries(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Audit log requested");
    let entries = state.gateway.audit_log().list();
    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}

/// Security-incident trail, oldest first
pub async fn list_security_incidents(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Security incident log requested");
    let incidents = state.gateway.security_log().list();
    Ok(HttpResponse::Ok().json(ApiResponse::success(incidents)))
}

/// Clear rate-limit state for one client key
pub async fn reset_rate_limit(
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let key = key.into_inner();
    match state.gateway.reset_rate_limit(&key).await {
        Ok(()) => {
            info!("Rate limit state reset for key");
            Ok(HttpResponse::Ok().json(ApiResponse::success("reset")))
        }
        Err(e) => {
            error!("Rate limit reset failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("reset failed".to_string())))
        }
    }
}
