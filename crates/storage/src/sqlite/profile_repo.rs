use academy_core::model::UserId;

use super::SqliteRepository;
use super::mapping::map_profile_row;
use crate::repository::{ProfileRecord, ProfileRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StorageError> {
        let user_id = record.user_id.to_string();
        let grade_level = record.grade_level.map(i64::from);

        sqlx::query(
            r"
            INSERT INTO profiles (user_id, display_name, grade_level, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
                display_name = excluded.display_name,
                grade_level = excluded.grade_level,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id)
        .bind(record.display_name.clone())
        .bind(grade_level)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<ProfileRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, display_name, grade_level, updated_at
            FROM profiles WHERE user_id = ?1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_profile_row(&row).map(Some),
            None => Ok(None),
        }
    }
}
