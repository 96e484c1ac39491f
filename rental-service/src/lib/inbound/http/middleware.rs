use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Principal resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Authentication outcome, stored once per request in its extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl Authentication {
    pub fn principal(&self) -> Option<&AuthenticatedUser> {
        match self {
            Authentication::Anonymous => None,
            Authentication::Authenticated(user) => Some(user),
        }
    }

    /// True when the caller is authenticated and owns the resource.
    pub fn authorize(&self, owner_id: &UserId) -> bool {
        self.principal()
            .is_some_and(|user| auth::can_mutate(&user.user_id, owner_id))
    }
}

/// Resolve the bearer token, if any, to a principal.
///
/// Never rejects on a bad token: the request continues as `Anonymous` and
/// protected routes answer 401 through [`require_authentication`]. Only a
/// failing user store short-circuits, with 500.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authentication = match bearer_token(req.headers()) {
        Some(token) => resolve(&state, token).await?,
        None => Authentication::Anonymous,
    };

    req.extensions_mut().insert(authentication);

    Ok(next.run(req).await)
}

async fn resolve(state: &AppState, token: &str) -> Result<Authentication, ApiError> {
    let claims = match state.authenticator.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(reason = %e, "Bearer token rejected");
            return Ok(Authentication::Anonymous);
        }
    };

    match state.user_service.find_principal(&claims.sub).await? {
        Some(user) => Ok(Authentication::Authenticated(AuthenticatedUser {
            user_id: user.id,
            email: user.email.as_str().to_string(),
        })),
        None => {
            tracing::warn!(subject = %claims.sub, "Token subject has no account");
            Ok(Authentication::Anonymous)
        }
    }
}

/// Guard for protected routes.
pub async fn require_authentication(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let principal = req
        .extensions()
        .get::<Authentication>()
        .and_then(Authentication::principal)
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}
