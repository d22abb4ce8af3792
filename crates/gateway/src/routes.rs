//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    auth_routes, guest_profile_routes, health_routes, staff_profile_routes, user_routes,
};
use crate::middleware::caller_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Caller-gated routes: each operation decides what an anonymous caller may do
    let protected = Router::new()
        .nest("/users", user_routes())
        .nest("/staff-profiles", staff_profile_routes())
        .nest("/guest-profiles", guest_profile_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            caller_middleware,
        ));

    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", auth_routes())
        .merge(protected)
        .with_state(state)
}
