use serde_json::{Map, Value};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info, warn};

use crate::backend::auth::{IdentityProvider, SessionSummary};
use crate::backend::dto::{FamilyProfileDto, FamilyProfileUpdate, UserDto};
use crate::backend::patch;
use crate::database::db::queries;
use crate::database::models::NewFamilyProfile;
use crate::error::{ProfileError, ProfileResult};

/// Store operations over family profiles and their owning users.
///
/// Each call is a handful of round trips against the pool; there is no
/// caching and no optimistic locking, so concurrent `update` and
/// `patch_partial` calls on one profile are last-writer-wins.
#[derive(Clone)]
pub struct FamilyProfileService {
    pool: Pool<Sqlite>,
}

impl FamilyProfileService {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create a profile for `profile.user_id` and mark that user as onboarded.
    pub async fn create(&self, profile: &FamilyProfileDto) -> ProfileResult<FamilyProfileDto> {
        let user_id = profile
            .user_id
            .ok_or(ProfileError::InvalidArgument("User ID cannot be null"))?;

        let draft = NewFamilyProfile::from(profile);
        let created = queries::create_family_profile(&self.pool, user_id, &draft)
            .await?
            .ok_or_else(|| {
                warn!(user_id, "Refusing to create family profile for unknown user");
                ProfileError::NotFound(format!("User {user_id}"))
            })?;

        info!(profile_id = created.id, user_id, "Family profile created");
        Ok(created.into())
    }

    pub async fn list(&self) -> ProfileResult<Vec<FamilyProfileDto>> {
        let profiles = queries::get_all_family_profiles(&self.pool).await?;
        debug!(count = profiles.len(), "Listed family profiles");
        Ok(profiles.into_iter().map(FamilyProfileDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> ProfileResult<Option<FamilyProfileDto>> {
        let profile = queries::get_family_profile_by_id(&self.pool, id).await?;
        debug!(profile_id = id, found = profile.is_some(), "Fetched family profile");
        Ok(profile.map(FamilyProfileDto::from))
    }

    /// Merge-update: only the fields present in `update` overwrite the stored profile.
    pub async fn update(
        &self,
        id: Option<i64>,
        update: Option<&FamilyProfileUpdate>,
    ) -> ProfileResult<FamilyProfileDto> {
        let id = id.ok_or(ProfileError::InvalidArgument("Profile ID cannot be null"))?;
        let update = update.ok_or(ProfileError::InvalidArgument("Family profile data cannot be null"))?;

        let mut existing = queries::get_family_profile_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("Family profile {id}")))?;

        update.merge_into(&mut existing);

        let saved = queries::update_family_profile(&self.pool, &existing)
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("Family profile {id}")))?;

        info!(profile_id = id, "Family profile updated");
        Ok(saved.into())
    }

    pub async fn delete(&self, id: i64) -> ProfileResult<()> {
        if !queries::family_profile_exists(&self.pool, id).await? {
            warn!(profile_id = id, "Delete requested for missing family profile");
            return Err(ProfileError::NotFound(format!("Family profile {id}")));
        }

        queries::delete_family_profile(&self.pool, id).await?;
        info!(profile_id = id, "Family profile deleted");
        Ok(())
    }

    /// Patch fields by transfer name. `Ok(None)` when no profile has `id`.
    ///
    /// The profile is written back only if every entry coerced cleanly.
    pub async fn patch_partial(
        &self,
        id: i64,
        updates: &Map<String, Value>,
    ) -> ProfileResult<Option<FamilyProfileDto>> {
        let Some(mut profile) = queries::get_family_profile_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        patch::apply_patch(&mut profile, updates).map_err(|e| {
            warn!(profile_id = id, error = %e, "Rejected family profile patch");
            ProfileError::invalid_operation(e)
        })?;

        let saved = queries::update_family_profile(&self.pool, &profile).await?;
        info!(profile_id = id, fields = updates.len(), "Family profile patched");
        Ok(saved.map(FamilyProfileDto::from))
    }

    pub async fn assign_user(&self, profile_id: i64, user_id: i64) -> ProfileResult<()> {
        let mut profile = queries::get_family_profile_by_id(&self.pool, profile_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("Family profile {profile_id}")))?;

        let user = queries::get_user_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("User {user_id}")))?;

        profile.user_id = Some(user.user_id);
        queries::update_family_profile(&self.pool, &profile).await?;
        info!(profile_id, user_id, "Family profile assigned to user");
        Ok(())
    }

    /// `Ok(None)` both when the user has no profile and when the user does not exist.
    pub async fn get_by_user_id(&self, user_id: Option<i64>) -> ProfileResult<Option<FamilyProfileDto>> {
        let user_id = user_id.ok_or(ProfileError::InvalidArgument("User ID cannot be null"))?;

        let profile = queries::get_family_profile_by_user_id(&self.pool, user_id).await?;
        debug!(user_id, found = profile.is_some(), "Fetched family profile by user");
        Ok(profile.map(FamilyProfileDto::from))
    }

    /// Profile of the authenticated caller. Fails with `NotFound` when nobody
    /// is authenticated or the principal has no user row.
    pub async fn get_for_current_user(
        &self,
        identity: &impl IdentityProvider,
    ) -> ProfileResult<Option<FamilyProfileDto>> {
        let authentication = identity
            .current_authentication()
            .ok_or_else(|| ProfileError::NotFound("Authenticated user".to_string()))?;

        let user = queries::get_user_by_principal(&self.pool, &authentication.principal)
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("User {}", authentication.principal)))?;

        let profile = queries::get_family_profile_by_user_id(&self.pool, user.user_id).await?;
        Ok(profile.map(FamilyProfileDto::from))
    }

    /// Session state for the frontend's post-login callback.
    pub async fn current_session(&self, identity: &impl IdentityProvider) -> ProfileResult<SessionSummary> {
        let Some(authentication) = identity.current_authentication() else {
            return Ok(SessionSummary::anonymous());
        };

        let Some(user) = queries::get_user_by_principal(&self.pool, &authentication.principal).await? else {
            return Ok(SessionSummary::anonymous());
        };

        let profile = queries::get_family_profile_by_user_id(&self.pool, user.user_id).await?;
        Ok(SessionSummary {
            is_authenticated: true,
            user: Some(UserDto::new(user, profile.map(|p| p.id))),
        })
    }
}
