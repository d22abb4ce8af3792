//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{
    AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest,
};
use crate::handlers::guest_profile_handler::UpdateGuestProfileRequest;
use crate::handlers::staff_profile_handler::{
    UpdateMyStaffProfileRequest, UpdateStaffProfileRequest,
};
use crate::handlers::user_handler::{ChangePasswordRequest, StatusResponse, UpdateAccountRequest};
use domain::{
    AccountResponse, GuestProfileResponse, GuestProfileView, Role, StaffProfileResponse,
    StaffProfileView,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::refresh,
        crate::handlers::user_handler::get_current_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::change_password,
        crate::handlers::staff_profile_handler::list_staff_profiles,
        crate::handlers::staff_profile_handler::get_my_staff_profile,
        crate::handlers::staff_profile_handler::update_my_staff_profile,
        crate::handlers::staff_profile_handler::get_staff_profile,
        crate::handlers::staff_profile_handler::update_staff_profile,
        crate::handlers::guest_profile_handler::list_guest_profiles,
        crate::handlers::guest_profile_handler::get_my_guest_profile,
        crate::handlers::guest_profile_handler::update_my_guest_profile,
        crate::handlers::guest_profile_handler::get_guest_profile,
        crate::handlers::guest_profile_handler::update_guest_profile,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            AuthResponse,
            RefreshResponse,
            Role,
            AccountResponse,
            UpdateAccountRequest,
            ChangePasswordRequest,
            StatusResponse,
            StaffProfileView,
            StaffProfileResponse,
            UpdateMyStaffProfileRequest,
            UpdateStaffProfileRequest,
            GuestProfileView,
            GuestProfileResponse,
            UpdateGuestProfileRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token refresh"),
        (name = "Users", description = "Account management endpoints"),
        (name = "Staff profiles", description = "Staff profile endpoints"),
        (name = "Guest profiles", description = "Guest profile endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
