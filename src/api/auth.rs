use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::services::auth_service::{AuthError, RegisteredUser};
use crate::services::{AuthService, UserService};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfigResponse {
    pub allow_registration: bool,
    pub allow_password_reset: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized("Invalid credentials".to_string()),
            AuthError::UserNotFound => Self::NotFound("User not found".to_string()),
            AuthError::AlreadyExists => Self::Conflict("User already exists".to_string()),
            AuthError::InvalidResetToken => {
                Self::BadRequest("Invalid or expired reset token".to_string())
            }
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::Database(msg) | AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Authentication middleware backed by the session cookie set at login.
pub async fn auth_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Ok(Some(user_id)) = session.get::<String>("user_id").await {
        tracing::Span::current().record("user_id", &user_id);
        return Ok(next.run(request).await);
    }

    Err(ApiError::Unauthorized("Not authenticated".to_string()))
}

/// Get the acting user's id from the session, error if not authenticated.
pub(super) async fn current_user_id(session: &Session) -> Result<String, ApiError> {
    session
        .get::<String>("user_id")
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /auth/config
/// Feature flags the login/registration screens need.
pub async fn auth_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AuthConfigResponse>>, ApiError> {
    let config = state.config().read().await;

    Ok(Json(ApiResponse::success(AuthConfigResponse {
        allow_registration: config.auth.allow_registration,
        allow_password_reset: config.auth.allow_password_reset,
    })))
}

/// POST /auth/register
/// Self-registration, available only while enabled in the configuration.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisteredUser>>, ApiError> {
    let allow_registration = state.config().read().await.auth.allow_registration;
    if !allow_registration {
        return Err(ApiError::forbidden("Registration is currently disabled"));
    }

    let user = state
        .auth_service()
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(user)))
}

/// POST /auth/login
/// Authenticate with email and password, establishes a session on success.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    // Create session
    if let Err(e) = session.insert("user_id", &user.id).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    Ok(Json(ApiResponse::success(user)))
}

/// POST /auth/logout
/// Invalidate the current session.
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    let _ = session.flush().await;

    Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

/// POST /auth/forgot-password
/// Issues a reset token. Answers identically whether or not the email
/// belongs to an account.
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<ForgotPasswordResponse>>, ApiError> {
    let (allow_reset, expose_token, host, port) = {
        let config = state.config().read().await;
        (
            config.auth.allow_password_reset,
            config.auth.expose_reset_token,
            config.server.host.clone(),
            config.server.port,
        )
    };

    if !allow_reset {
        return Err(ApiError::forbidden("Password reset is currently disabled"));
    }

    let token = state.auth_service().forgot_password(&payload.email).await?;

    if let Some(token) = &token {
        // No mailer is wired up; the link goes to the server log for an
        // operator to pass on.
        tracing::info!(
            "Password reset requested for {}: http://{}:{}/reset-password?token={}",
            payload.email,
            host,
            port,
            token
        );
    }

    Ok(Json(ApiResponse::success(ForgotPasswordResponse {
        message: "If an account with that email exists, a password reset link has been sent"
            .to_string(),
        reset_token: if expose_token { token } else { None },
    })))
}

/// POST /auth/reset-password
/// Consumes a reset token and sets the new password.
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service()
        .reset_password(&payload.token, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Password reset successfully".to_string(),
    })))
}

/// GET /auth/me
/// Get the authenticated user's own record.
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user_id = current_user_id(&session).await?;
    let user = state.user_service().get_user(&user_id).await?;

    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/me
/// Update the authenticated user's own profile. The email is immutable.
pub async fn update_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user_id = current_user_id(&session).await?;
    let user = state
        .user_service()
        .update_profile(&user_id, payload.name)
        .await?;

    Ok(Json(ApiResponse::success(user)))
}

/// POST /auth/change-password
/// Change the authenticated user's password after verifying the current one.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = current_user_id(&session).await?;

    state
        .user_service()
        .change_own_password(&user_id, &payload.current_password, &payload.new_password)
        .await?;

    tracing::info!("Password changed for user {}", user_id);

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Password updated successfully".to_string(),
    })))
}
