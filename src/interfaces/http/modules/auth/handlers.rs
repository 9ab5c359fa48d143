//! Authentication API handlers
//!
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, LogoutAllResponse, SessionResponse, SignupRequest, UserInfo};
use crate::application::identity::UserService;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiResponse, ApiResult, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Auth handler state, concrete over `UserRepository`.
#[derive(Clone)]
pub struct AuthHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created and logged in", body = ApiResponse<SessionResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SessionResponse>>)> {
    let auth = state
        .user_service
        .signup(&request.email, &request.password, request.role.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SessionResponse::from(auth))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let auth = state
        .user_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(ApiResponse::success(SessionResponse::from(auth))))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token revoked", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    caller: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    state
        .user_service
        .logout(caller.user_id(), &caller.token)
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout-all",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All sessions revoked", body = ApiResponse<LogoutAllResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout_all(
    State(state): State<AuthHandlerState>,
    caller: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<LogoutAllResponse>>> {
    let revoked = state.user_service.logout_all(caller.user_id()).await?;
    Ok(Json(ApiResponse::success(LogoutAllResponse { revoked })))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(caller: AuthenticatedUser) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(UserInfo::from(caller.user)))
}

#[utoipa::path(
    delete,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Caller still manages departments")
    )
)]
pub async fn delete_account(
    State(state): State<AuthHandlerState>,
    caller: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    state.user_service.delete_account(caller.user_id()).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
