use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    RegisterProfileRequest, RestrictionList, ServiceError, ServiceResult, Session,
    UpdateProfileRequest, UserProfile, Validate,
};
use crate::repositories::ProfileRepository;

/// Service for user profiles and their dietary restriction sets
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Create a new ProfileService
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Register a new profile with an empty restriction list
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register_profile(
        &self,
        request: RegisterProfileRequest,
    ) -> ServiceResult<UserProfile> {
        info!("Registering new profile");

        request.validate()?;

        let profile = UserProfile::new(request);
        let created = self.repository.create(profile).await?;

        info!("Profile registered with ID: {}", created.user_id);
        Ok(created)
    }

    /// Get a profile by user ID
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_profile(&self, user_id: &str) -> ServiceResult<UserProfile> {
        match self.repository.find_by_id(user_id).await? {
            Some(profile) => Ok(profile),
            None => {
                warn!("Profile not found");
                Err(ServiceError::ProfileNotFound {
                    user_id: user_id.to_string(),
                })
            }
        }
    }

    /// Open a session for a stored profile. The session is the explicit
    /// "current user" handle screens pass around; it is dropped at logout.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn begin_session(&self, user_id: &str) -> ServiceResult<Session> {
        let profile = self.get_profile(user_id).await?;

        info!("Session started for {}", profile.username);
        Ok(Session::new(&profile))
    }

    /// Update username or avatar
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserProfile> {
        info!("Updating profile");

        request.validate()?;

        let mut profile = self.get_profile(user_id).await?;
        profile.update(request);

        let updated = self.repository.update(profile).await?;

        info!("Profile updated successfully");
        Ok(updated)
    }

    /// Commit an edited restriction list to the data store.
    ///
    /// The list is borrowed: on a persistence failure the caller's working
    /// copy is untouched and the error is surfaced unchanged, never
    /// retried here.
    #[instrument(skip(self, restrictions), fields(user_id = %user_id, count = restrictions.len()))]
    pub async fn commit_restrictions(
        &self,
        user_id: &str,
        restrictions: &RestrictionList,
    ) -> ServiceResult<UserProfile> {
        info!("Committing dietary restrictions");

        let mut profile = self.get_profile(user_id).await?;
        profile.set_restrictions(restrictions.clone());

        let saved = self.repository.update(profile).await?;

        info!("Dietary restrictions saved");
        Ok(saved)
    }
}
