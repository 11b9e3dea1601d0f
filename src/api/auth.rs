//! Authentication Middleware
//!
//! Rejects requests whose Authorization header does not match the configured
//! token. Without a configured token every request passes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::handlers::AppState;
use crate::error::{Result, StoreError};

pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(expected) = state.auth_token.as_deref() {
        let provided = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected) {
            warn!(
                method = %request.method(),
                uri = %request.uri(),
                "Rejected request with missing or invalid token"
            );
            return Err(StoreError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}
