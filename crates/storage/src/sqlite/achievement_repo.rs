use chrono::{DateTime, Utc};

use academy_core::model::{AchievementId, UserId};

use super::SqliteRepository;
use super::mapping::map_earned_row;
use crate::repository::{AchievementRepository, EarnedAchievement, StorageError};

#[async_trait::async_trait]
impl AchievementRepository for SqliteRepository {
    async fn grant(
        &self,
        user_id: UserId,
        achievement_id: &AchievementId,
        earned_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO achievements (user_id, achievement_id, earned_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, achievement_id) DO NOTHING
            ",
        )
        .bind(user_id.to_string())
        .bind(achievement_id.as_str())
        .bind(earned_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_earned(&self, user_id: UserId) -> Result<Vec<EarnedAchievement>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT achievement_id, earned_at
            FROM achievements
            WHERE user_id = ?1
            ORDER BY earned_at ASC, achievement_id ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut earned = Vec::with_capacity(rows.len());
        for row in rows {
            earned.push(map_earned_row(&row)?);
        }
        Ok(earned)
    }
}
