//! Advisor chat endpoint
//!
//! The single user-facing route. The pipeline runs server-side and the client
//! key comes from the server-observed peer identity, never from client-reported
//! state; the system prompt comes from configuration, never from the request.

use crate::core::types::{ChatRequest, ChatResponse, ErrorCode};
use crate::server::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::debug;

/// Configure chat routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/advisor/chat", web::post().to(advisor_chat));
}

/// Client-supplied portion of a chat submission
#[derive(Debug, Deserialize)]
pub struct ChatSubmission {
    /// Raw user text
    pub message: String,
    /// Opaque conversation context echoed to the backend
    #[serde(default)]
    pub context: String,
}

/// Advisor chat endpoint
pub async fn advisor_chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    submission: web::Json<ChatSubmission>,
) -> ActixResult<HttpResponse> {
    let client_key = client_key(&req);
    debug!("Advisor chat submission received");

    let submission = submission.into_inner();
    let request = ChatRequest {
        message: submission.message,
        context: submission.context,
        system_prompt: state.config.gateway.llm.system_prompt.clone(),
    };

    let response = state.gateway.handle(&client_key, request).await;
    Ok(to_http(response))
}

/// Server-trusted throttling identity: the peer address. Deployments behind a
/// reverse proxy should terminate with a real-IP-restoring layer in front.
fn client_key(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| format!("ip:{}", addr.ip()))
        .unwrap_or_else(|| "ip:unknown".to_string())
}

fn to_http(response: ChatResponse) -> HttpResponse {
    match response.error {
        None => HttpResponse::Ok().json(response),
        Some(ErrorCode::RateLimit) => {
            let mut builder = HttpResponse::TooManyRequests();
            if let Some(retry_ms) = response
                .rate_limit_info
                .as_ref()
                .and_then(|info| info.retry_after_ms)
            {
                builder.insert_header(("Retry-After", retry_ms.div_ceil(1000).to_string()));
            }
            builder.json(response)
        }
        Some(ErrorCode::Blocked) => HttpResponse::BadRequest().json(response),
        Some(ErrorCode::ServiceError) => HttpResponse::ServiceUnavailable().json(response),
    }
}
