//! Service layer: the family profile store, the patch engine it uses, and
//! the hooks the identity provider calls into.

pub mod auth;
pub mod dto;
pub mod patch;
pub mod profile_service;

pub use auth::{AuthSuccessRedirect, Authentication, IdentityProvider, SessionSummary};
pub use dto::{FamilyProfileDto, FamilyProfileUpdate, UserDto};
pub use profile_service::FamilyProfileService;
