//! Guest profile handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{
    AccountChanges, Caller, GuestProfileChanges, GuestProfileResponse, GuestProfileView,
    Preferences, ProfileUpdate,
};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Partial update of the flattened guest view. Every field is optional;
/// account-side and profile-side fields are written together.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGuestProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 15, message = "Phone number is too long"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 50, message = "Nationality is too long"))]
    #[schema(example = "PT")]
    pub nationality: Option<String>,
    #[validate(length(max = 50, message = "Passport number is too long"))]
    pub passport_number: Option<String>,
    #[validate(length(max = 50, message = "ID number is too long"))]
    pub id_number: Option<String>,
    /// `null` clears a stored date
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub date_of_birth: Option<Option<NaiveDate>>,
    /// Free-form JSON object
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<Preferences>,
}

impl From<UpdateGuestProfileRequest> for ProfileUpdate<GuestProfileChanges> {
    fn from(req: UpdateGuestProfileRequest) -> Self {
        Self {
            account: AccountChanges {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
                address: req.address,
                profile_picture: None,
            },
            profile: GuestProfileChanges {
                nationality: req.nationality,
                passport_number: req.passport_number,
                id_number: req.id_number,
                date_of_birth: req.date_of_birth,
                preferences: req.preferences,
            },
        }
    }
}

/// Create guest profile routes
pub fn guest_profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_guest_profiles))
        .route(
            "/me",
            get(get_my_guest_profile)
                .put(update_my_guest_profile)
                .patch(update_my_guest_profile),
        )
        .route("/:id", get(get_guest_profile).patch(update_guest_profile))
}

/// The caller's own guest profile
#[utoipa::path(
    get,
    path = "/guest-profiles/me",
    tag = "Guest profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own guest profile", body = GuestProfileView),
        (status = 400, description = "Not a guest"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_guest_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
) -> AppResult<Json<GuestProfileView>> {
    Ok(Json(state.profiles.my_guest_profile(&caller).await?))
}

/// Update the caller's own account and guest profile (PUT and PATCH are both partial)
#[utoipa::path(
    patch,
    path = "/guest-profiles/me",
    tag = "Guest profiles",
    security(("bearer_auth" = [])),
    request_body = UpdateGuestProfileRequest,
    responses(
        (status = 200, description = "Guest profile updated", body = GuestProfileView),
        (status = 400, description = "Validation error or not a guest"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_my_guest_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateGuestProfileRequest>,
) -> AppResult<Json<GuestProfileView>> {
    let view = state
        .profiles
        .update_my_guest_profile(&caller, payload.into())
        .await?;
    Ok(Json(view))
}

/// List all guest profiles (admin/manager)
#[utoipa::path(
    get,
    path = "/guest-profiles",
    tag = "Guest profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All guest profiles", body = Vec<GuestProfileResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin or manager only")
    )
)]
pub async fn list_guest_profiles(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<GuestProfileResponse>>> {
    Ok(Json(state.profiles.list_guest_profiles(&caller).await?))
}

/// Get guest profile by ID (self or admin/manager)
#[utoipa::path(
    get,
    path = "/guest-profiles/{id}",
    tag = "Guest profiles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Guest profile ID")
    ),
    responses(
        (status = 200, description = "Guest profile", body = GuestProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Guest profile not found")
    )
)]
pub async fn get_guest_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<GuestProfileResponse>> {
    Ok(Json(state.profiles.get_guest_profile(&caller, id).await?))
}

/// Update guest profile by ID (self or admin/manager)
#[utoipa::path(
    patch,
    path = "/guest-profiles/{id}",
    tag = "Guest profiles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Guest profile ID")
    ),
    request_body = UpdateGuestProfileRequest,
    responses(
        (status = 200, description = "Guest profile updated", body = GuestProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Guest profile not found")
    )
)]
pub async fn update_guest_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateGuestProfileRequest>,
) -> AppResult<Json<GuestProfileResponse>> {
    let profile = state
        .profiles
        .update_guest_profile(&caller, id, payload.into())
        .await?;
    Ok(Json(profile))
}
