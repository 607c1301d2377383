use std::sync::Arc;

use academy_core::Clock;
use academy_core::model::{Profile, UserId};
use storage::repository::{ProfileRecord, ProfileRepository};

use crate::auth::Session;
use crate::error::ProfileServiceError;

/// Reads and writes learner profiles through the record store.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, profiles }
    }

    /// Fetches the stored profile, if any.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` for storage failures or a record that no
    /// longer validates.
    pub async fn profile(&self, user_id: UserId) -> Result<Option<Profile>, ProfileServiceError> {
        match self.profiles.get_profile(user_id).await? {
            Some(record) => Ok(Some(record.into_profile()?)),
            None => Ok(None),
        }
    }

    /// Persists a profile, stamping it with the service clock.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` for storage failures.
    pub async fn save(&self, profile: &Profile) -> Result<(), ProfileServiceError> {
        let record = ProfileRecord::from_profile(profile, self.clock.now());
        self.profiles.upsert_profile(&record).await?;
        Ok(())
    }

    /// The stored profile, or a fresh one seeded from the session.
    ///
    /// Used on sign-in so every signed-in learner has a profile row.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` for storage or validation failures.
    pub async fn ensure(&self, session: &Session) -> Result<Profile, ProfileServiceError> {
        if let Some(existing) = self.profile(session.user_id()).await? {
            return Ok(existing);
        }

        let profile = Profile::new(session.user_id(), session.display_name(), None)?;
        self.save(&profile).await?;
        Ok(profile)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;
    use uuid::Uuid;

    fn service() -> ProfileService {
        ProfileService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    fn session() -> Session {
        Session::new(UserId::new(Uuid::new_v4()), "dana@example.com", "Dana")
    }

    #[tokio::test]
    async fn ensure_creates_then_reuses() {
        let service = service();
        let session = session();

        let created = service.ensure(&session).await.unwrap();
        assert_eq!(created.display_name(), "Dana");

        let updated = Profile::new(session.user_id(), "Dana R.", Some(6)).unwrap();
        service.save(&updated).await.unwrap();

        let reused = service.ensure(&session).await.unwrap();
        assert_eq!(reused.display_name(), "Dana R.");
        assert_eq!(reused.grade_level(), Some(6));
    }

    #[tokio::test]
    async fn profile_is_none_for_unknown_user() {
        let service = service();
        let missing = service.profile(UserId::new(Uuid::new_v4())).await.unwrap();
        assert!(missing.is_none());
    }
}
