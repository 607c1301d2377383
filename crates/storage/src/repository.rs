use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use academy_core::model::{AchievementId, Profile, ProfileError, UserId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of a learner profile.
///
/// This mirrors the domain `Profile` so repositories can serialize and
/// deserialize without leaking storage concerns into the domain layer.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub grade_level: Option<u8>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    #[must_use]
    pub fn from_profile(profile: &Profile, updated_at: DateTime<Utc>) -> Self {
        Self {
            user_id: profile.user_id(),
            display_name: profile.display_name().to_owned(),
            grade_level: profile.grade_level(),
            updated_at,
        }
    }

    /// Convert the record back into a domain `Profile`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the persisted fields fail validation.
    pub fn into_profile(self) -> Result<Profile, ProfileError> {
        Profile::new(self.user_id, self.display_name, self.grade_level)
    }
}

/// One achievement a learner has earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarnedAchievement {
    pub achievement_id: AchievementId,
    pub earned_at: DateTime<Utc>,
}

/// Repository contract for learner profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist or update a profile record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StorageError>;

    /// Fetch a profile record by user id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures; a missing profile is `None`.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<ProfileRecord>, StorageError>;
}

/// Repository contract for earned achievements.
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Record an achievement for a user.
    ///
    /// Idempotent: returns `true` when the achievement was newly earned and
    /// `false` when the user already had it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the grant cannot be stored.
    async fn grant(
        &self,
        user_id: UserId,
        achievement_id: &AchievementId,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, StorageError>;

    /// All achievements the user has earned, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_earned(&self, user_id: UserId) -> Result<Vec<EarnedAchievement>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    profiles: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
    achievements: Arc<Mutex<HashMap<UserId, BTreeMap<AchievementId, DateTime<Utc>>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StorageError> {
        let mut guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.user_id, record.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<ProfileRecord>, StorageError> {
        let guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&user_id).cloned())
    }
}

#[async_trait]
impl AchievementRepository for InMemoryRepository {
    async fn grant(
        &self,
        user_id: UserId,
        achievement_id: &AchievementId,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let mut guard = self
            .achievements
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let earned = guard.entry(user_id).or_default();
        if earned.contains_key(achievement_id) {
            return Ok(false);
        }
        earned.insert(achievement_id.clone(), earned_at);
        Ok(true)
    }

    async fn list_earned(&self, user_id: UserId) -> Result<Vec<EarnedAchievement>, StorageError> {
        let guard = self
            .achievements
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut earned: Vec<EarnedAchievement> = guard
            .get(&user_id)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(achievement_id, earned_at)| EarnedAchievement {
                        achievement_id: achievement_id.clone(),
                        earned_at: *earned_at,
                    })
                    .collect()
            })
            .unwrap_or_default();
        earned.sort_by_key(|entry| entry.earned_at);
        Ok(earned)
    }
}

/// Aggregates the record-store repositories behind trait objects for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
    pub achievements: Arc<dyn AchievementRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo.clone());
        let achievements: Arc<dyn AchievementRepository> = Arc::new(repo);
        Self {
            profiles,
            achievements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::time::fixed_now;
    use uuid::Uuid;

    fn user() -> UserId {
        UserId::new(Uuid::new_v4())
    }

    #[tokio::test]
    async fn profile_roundtrip() {
        let repo = InMemoryRepository::new();
        let user_id = user();
        let profile = Profile::new(user_id, "Dana", Some(4)).unwrap();
        let record = ProfileRecord::from_profile(&profile, fixed_now());
        repo.upsert_profile(&record).await.unwrap();

        let fetched = repo.get_profile(user_id).await.unwrap().unwrap();
        assert_eq!(fetched.into_profile().unwrap(), profile);
    }

    #[tokio::test]
    async fn missing_profile_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_profile(user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn grant_is_idempotent() {
        let repo = InMemoryRepository::new();
        let user_id = user();
        let id = AchievementId::new("first-course").unwrap();

        assert!(repo.grant(user_id, &id, fixed_now()).await.unwrap());
        assert!(!repo.grant(user_id, &id, fixed_now()).await.unwrap());

        let earned = repo.list_earned(user_id).await.unwrap();
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].achievement_id, id);
    }
}
