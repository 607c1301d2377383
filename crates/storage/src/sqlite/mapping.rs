use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use academy_core::model::{AchievementId, UserId};

use crate::repository::{EarnedAchievement, ProfileRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// User ids are stored as canonical hyphenated UUID text.
pub(crate) fn user_id_from_text(raw: &str) -> Result<UserId, StorageError> {
    raw.parse::<UserId>()
        .map_err(|_| StorageError::Serialization(format!("invalid user_id: {raw}")))
}

pub(crate) fn achievement_id_from_text(raw: String) -> Result<AchievementId, StorageError> {
    AchievementId::new(raw).map_err(ser)
}

pub(crate) fn grade_level_from_i64(value: Option<i64>) -> Result<Option<u8>, StorageError> {
    value
        .map(|raw| {
            u8::try_from(raw)
                .map_err(|_| StorageError::Serialization(format!("invalid grade_level: {raw}")))
        })
        .transpose()
}

pub(crate) fn map_profile_row(row: &SqliteRow) -> Result<ProfileRecord, StorageError> {
    let user_id_text: String = row.try_get("user_id").map_err(ser)?;
    Ok(ProfileRecord {
        user_id: user_id_from_text(&user_id_text)?,
        display_name: row.try_get("display_name").map_err(ser)?,
        grade_level: grade_level_from_i64(row.try_get("grade_level").map_err(ser)?)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_earned_row(row: &SqliteRow) -> Result<EarnedAchievement, StorageError> {
    Ok(EarnedAchievement {
        achievement_id: achievement_id_from_text(
            row.try_get::<String, _>("achievement_id").map_err(ser)?,
        )?,
        earned_at: row.try_get("earned_at").map_err(ser)?,
    })
}
