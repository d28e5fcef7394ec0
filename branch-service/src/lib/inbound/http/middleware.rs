use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;

use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated branch in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedBranch {
    pub login: String,
    pub token_expires_at: DateTime<Utc>,
}

/// Middleware that validates bearer tokens and adds the branch login to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_engine.validate(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        match e {
            TokenError::TokenExpired => unauthorized("Token expired"),
            TokenError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error"
                })),
            )
                .into_response(),
            _ => unauthorized("Invalid token"),
        }
    })?;

    req.extensions_mut().insert(AuthenticatedBranch {
        login: claims.sub,
        token_expires_at: claims.exp,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization header format. Expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
