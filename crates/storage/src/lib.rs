#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    AchievementRepository, EarnedAchievement, InMemoryRepository, ProfileRecord,
    ProfileRepository, Storage, StorageError,
};
pub use sqlite::SqliteInitError;
