//! Account handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use account_service_lib::service::ChangePassword;
use common::AppResult;
use domain::{AccountChanges, AccountId, AccountResponse, Caller};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Account update request with validation. Role is not updatable.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[schema(example = "Ana")]
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 15, message = "Phone number is too long"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Storage reference of an uploaded picture; `null` removes it
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Option<Option<String>>,
}

impl From<UpdateAccountRequest> for AccountChanges {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            profile_picture: req.profile_picture,
        }
    }
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub new_password: String,
    pub new_password_confirm: String,
}

impl From<ChangePasswordRequest> for ChangePassword {
    fn from(req: ChangePasswordRequest) -> Self {
        Self {
            old_password: req.old_password,
            new_password: req.new_password,
            new_password_confirm: req.new_password_confirm,
        }
    }
}

/// Outcome of a state-changing action without a body of its own
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "password changed")]
    pub status: String,
}

/// Create account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/change-password", post(change_password))
}

/// Get current authenticated account
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.accounts.me(&caller).await?;
    Ok(Json(account.into()))
}

/// List all accounts (admin/manager)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all accounts", body = Vec<AccountResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin or manager only")
    )
)]
pub async fn list_users(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.accounts.list_accounts(&caller).await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Get account by ID (self or admin/manager)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account", body = AccountResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Can only view own account unless admin or manager"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_user(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.accounts.get_account(&caller, id).await?;
    Ok(Json(account.into()))
}

/// Update account contact fields (self or admin/manager)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Can only update own account unless admin or manager"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_user(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    ValidatedJson(payload): ValidatedJson<UpdateAccountRequest>,
) -> AppResult<Json<AccountResponse>> {
    let account = state
        .accounts
        .update_account(&caller, id, payload.into())
        .await?;
    Ok(Json(account.into()))
}

/// Delete account and its profile (admin/manager, cannot delete self)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted successfully"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin or manager only"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_user(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> AppResult<StatusCode> {
    state.accounts.delete_account(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change password after re-verifying the old one (self or admin/manager)
#[utoipa::path(
    post,
    path = "/users/{id}/change-password",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = StatusResponse),
        (status = 400, description = "New passwords don't match"),
        (status = 401, description = "Unauthorized or old password is incorrect"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn change_password(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<StatusResponse>> {
    state
        .accounts
        .change_password(&caller, id, payload.into())
        .await?;
    Ok(Json(StatusResponse {
        status: "password changed".to_string(),
    }))
}
