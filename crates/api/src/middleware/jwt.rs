use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// JWT middleware that extracts and validates JWT tokens from Authorization header
/// and adds claims to the request extensions for GraphQL context
pub async fn jwt_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = bearer_token(&request) {
        match state.jwt_service().verify_token(token) {
            Ok(claims) => {
                request.extensions_mut().insert::<Claims>(claims);
            }
            Err(e) => {
                tracing::warn!("Rejected bearer token: {e}");
                return Err(AppError::Unauthorized(
                    "Invalid or expired token".to_string(),
                ));
            }
        }
    }

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}
