//! SeaORM entity definitions.

pub mod account;
pub mod guest_profile;
pub mod staff_profile;
