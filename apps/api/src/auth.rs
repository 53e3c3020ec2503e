//! Bearer-token authentication for protected routes.

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, error};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::StoreResult;

/// Resolves an opaque bearer token to the id of the user it was issued to.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn resolve(&self, token: &str) -> StoreResult<Option<Uuid>>;
}

/// The authenticated caller, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

/// Middleware that validates `Authorization: Bearer <token>` and stores the
/// resolved `AuthUser` for handlers. Anything else is rejected with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?;

    let user_id = state
        .tokens
        .resolve(token)
        .await
        .map_err(|e| {
            error!("Failed to resolve bearer token: {e}");
            AppError::Unauthorized
        })?
        .ok_or_else(|| {
            debug!("Rejected unknown or expired bearer token");
            AppError::Unauthorized
        })?;

    req.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(req).await)
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts_token() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("bearer   abc123 "), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
    }
}
