//! Authentication gate and role extractors for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::application::identity::{require_role, UserService};
use crate::domain::{User, UserRole};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::ApiError;

/// State for the authentication middleware
#[derive(Clone)]
pub struct AuthState {
    pub user_service: Arc<UserService<UserRepository>>,
}

/// The caller resolved by [`auth_middleware`], with the token it presented.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Authenticated caller holding the `Manager` role.
///
/// Rejects with 401 when the request never passed the gate and 403 for any
/// other role.
#[derive(Clone, Debug)]
pub struct ManagerUser(pub AuthenticatedUser);

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer-token authentication middleware.
///
/// Verifies the token and requires it to be in the subject's valid-token
/// set, then stores an [`AuthenticatedUser`] in the request extensions.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)
        .map(String::from);

    let Some(token) = token else {
        debug!(uri = %request.uri(), "Missing or malformed Authorization header");
        return ApiError::unauthenticated().into_response();
    };

    match auth_state.user_service.authenticate(&token).await {
        Ok(user) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { user, token });
            next.run(request).await
        }
        Err(e) => {
            warn!(uri = %request.uri(), reason = %e, "Authentication failed");
            ApiError::from(e).into_response()
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(ApiError::unauthenticated)
    }
}

impl<S> FromRequestParts<S> for ManagerUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let caller = AuthenticatedUser::from_request_parts(parts, state).await?;
        require_role(&caller.user, UserRole::Manager).map_err(|e| {
            debug!(user_id = %caller.user.id, "Manager role required");
            ApiError::from(e)
        })?;
        Ok(ManagerUser(caller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_is_required() {
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("Bearer   "), None);
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("abc.def"), None);
    }
}
