//! Authentication handlers: registration, login and token refresh.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use account_service_lib::service::{AuthSession, RegisterAccount};
use common::AppResult;
use domain::{AccountResponse, Role};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Registration request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address"))]
    #[schema(example = "guest@hotel.test")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub password_confirm: String,
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Silva")]
    pub last_name: String,
    /// Defaults to `guest`
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    #[validate(length(max = 15, message = "Phone number is too long"))]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl From<RegisterRequest> for RegisterAccount {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            password_confirm: req.password_confirm,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            phone: req.phone,
            address: req.address,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "guest@hotel.test")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh: String,
}

/// Account plus a fresh token pair
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: AccountResponse,
    pub access: String,
    pub refresh: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user,
            access: session.access,
            refresh: session.refresh,
        }
    }
}

/// A new access token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

/// Register a new account and its profile
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = AuthResponse),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let session = state.auth.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Exchange email and password for a token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(session.into()))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let access = state.auth.refresh(&payload.refresh).await?;
    Ok(Json(RefreshResponse { access }))
}
