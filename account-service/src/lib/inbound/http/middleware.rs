use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that verifies bearer tokens and resolves the account they
/// belong to, storing it in the request extensions.
///
/// The subject is re-resolved against the store on every request; tokens
/// for deleted or deactivated accounts are rejected before their
/// expiration.
pub async fn authenticate<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Verify signature and expiration
    let claims = state.token_issuer.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        ApiError::Unauthorized("Invalid token format".to_string()).into_response()
    })?;

    // Resolve the subject against the store
    let auth_user = state.auth_service.get_profile(&user_id).await.map_err(|e| match e {
        UserError::InvalidCredentials => {
            tracing::warn!("Rejected token for missing account {}", user_id);
            ApiError::Unauthorized("User not found or inactive".to_string()).into_response()
        }
        other => ApiError::from(other).into_response(),
    })?;

    if !auth_user.is_active {
        tracing::warn!("Rejected token for inactive account {}", user_id);
        return Err(
            ApiError::Unauthorized("User not found or inactive".to_string()).into_response(),
        );
    }

    // Add the resolved account to request extensions
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
