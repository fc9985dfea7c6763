pub mod family_profile;
pub mod user;

pub use family_profile::{FamilyProfile, NewFamilyProfile, RiskTolerance};
pub use user::User;
