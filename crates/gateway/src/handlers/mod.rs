//! HTTP handlers.

pub mod auth_handler;
pub mod guest_profile_handler;
pub mod health_handler;
pub mod staff_profile_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use guest_profile_handler::guest_profile_routes;
pub use health_handler::health_routes;
pub use staff_profile_handler::staff_profile_routes;
pub use user_handler::user_routes;
