//! Staff profile handlers.

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
    AccountChanges, Caller, ProfileUpdate, StaffProfileChanges, StaffProfileResponse,
    StaffProfileView,
};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Owner update of the flattened staff view. `employee_id` and `hire_date`
/// are read-only here.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMyStaffProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 15, message = "Phone number is too long"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 50, message = "Department is too long"))]
    #[schema(example = "Front Office")]
    pub department: Option<String>,
    #[validate(length(max = 50, message = "Position is too long"))]
    pub position: Option<String>,
}

impl From<UpdateMyStaffProfileRequest> for ProfileUpdate<StaffProfileChanges> {
    fn from(req: UpdateMyStaffProfileRequest) -> Self {
        Self {
            account: AccountChanges {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
                address: req.address,
                profile_picture: None,
            },
            profile: StaffProfileChanges {
                department: req.department,
                position: req.position,
                hire_date: None,
            },
        }
    }
}

/// Administrative staff profile update
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffProfileRequest {
    #[validate(length(max = 50, message = "Department is too long"))]
    pub department: Option<String>,
    #[validate(length(max = 50, message = "Position is too long"))]
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

impl From<UpdateStaffProfileRequest> for StaffProfileChanges {
    fn from(req: UpdateStaffProfileRequest) -> Self {
        Self {
            department: req.department,
            position: req.position,
            hire_date: req.hire_date,
        }
    }
}

/// Create staff profile routes
pub fn staff_profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff_profiles))
        .route("/me", get(get_my_staff_profile).patch(update_my_staff_profile))
        .route("/:id", get(get_staff_profile).patch(update_staff_profile))
}

/// The caller's own staff profile
#[utoipa::path(
    get,
    path = "/staff-profiles/me",
    tag = "Staff profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own staff profile", body = StaffProfileView),
        (status = 400, description = "Not a staff member"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_staff_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
) -> AppResult<Json<StaffProfileView>> {
    Ok(Json(state.profiles.my_staff_profile(&caller).await?))
}

/// Update the caller's own account and staff profile
#[utoipa::path(
    patch,
    path = "/staff-profiles/me",
    tag = "Staff profiles",
    security(("bearer_auth" = [])),
    request_body = UpdateMyStaffProfileRequest,
    responses(
        (status = 200, description = "Staff profile updated", body = StaffProfileView),
        (status = 400, description = "Validation error or not a staff member"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_my_staff_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateMyStaffProfileRequest>,
) -> AppResult<Json<StaffProfileView>> {
    let view = state
        .profiles
        .update_my_staff_profile(&caller, payload.into())
        .await?;
    Ok(Json(view))
}

/// List all staff profiles (admin/manager)
#[utoipa::path(
    get,
    path = "/staff-profiles",
    tag = "Staff profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All staff profiles", body = Vec<StaffProfileResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin or manager only")
    )
)]
pub async fn list_staff_profiles(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StaffProfileResponse>>> {
    Ok(Json(state.profiles.list_staff_profiles(&caller).await?))
}

/// Get staff profile by ID (self or admin/manager)
#[utoipa::path(
    get,
    path = "/staff-profiles/{id}",
    tag = "Staff profiles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Staff profile ID")
    ),
    responses(
        (status = 200, description = "Staff profile", body = StaffProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Staff profile not found")
    )
)]
pub async fn get_staff_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffProfileResponse>> {
    Ok(Json(state.profiles.get_staff_profile(&caller, id).await?))
}

/// Update staff profile by ID (admin/manager)
#[utoipa::path(
    patch,
    path = "/staff-profiles/{id}",
    tag = "Staff profiles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Staff profile ID")
    ),
    request_body = UpdateStaffProfileRequest,
    responses(
        (status = 200, description = "Staff profile updated", body = StaffProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin or manager only"),
        (status = 404, description = "Staff profile not found")
    )
)]
pub async fn update_staff_profile(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateStaffProfileRequest>,
) -> AppResult<Json<StaffProfileResponse>> {
    let profile = state
        .profiles
        .update_staff_profile(&caller, id, payload.into())
        .await?;
    Ok(Json(profile))
}
