use std::collections::HashSet;
use std::sync::Arc;

use academy_core::Clock;
use academy_core::classify::Classification;
use academy_core::model::{Achievement, AchievementError, AchievementId, Course, UserId};
use academy_core::scoring::QuizResult;
use storage::repository::{AchievementRepository, EarnedAchievement};

use crate::catalog::Catalog;
use crate::error::AchievementServiceError;

/// Slug for the first passed course.
pub const FIRST_COURSE: &str = "first-course";
/// Slug for a 100% quiz score.
pub const TOP_MARKS: &str = "top-marks";
/// Slug for the first issued certificate.
pub const CERTIFIED: &str = "certified";

/// Slug for passing a particular course.
///
/// # Errors
///
/// Never fails for a real course id; the slug alphabet covers the formatted
/// value.
pub fn course_completed_id(course: &Course) -> Result<AchievementId, AchievementError> {
    AchievementId::new(format!("course-{}-completed", course.id()))
}

/// All achievements the catalog can award, for display purposes.
///
/// # Errors
///
/// Returns `AchievementError` if a description fails validation.
pub fn achievements_for_catalog(catalog: &Catalog) -> Result<Vec<Achievement>, AchievementError> {
    let mut all = vec![
        Achievement::new(
            AchievementId::new(FIRST_COURSE)?,
            "First expedition",
            "Passed the final test of a course for the first time.",
        )?,
        Achievement::new(
            AchievementId::new(TOP_MARKS)?,
            "Top marks",
            "Answered every question of a final test correctly.",
        )?,
        Achievement::new(
            AchievementId::new(CERTIFIED)?,
            "Certified explorer",
            "Downloaded a course certificate.",
        )?,
    ];
    for course in catalog.courses() {
        all.push(Achievement::new(
            course_completed_id(course)?,
            format!("Completed: {}", course.title()),
            format!("Passed the final test of \"{}\".", course.title()),
        )?);
    }
    Ok(all)
}

/// Grants achievements against the record store.
///
/// Granting is idempotent at the repository level; the service reports only
/// the ids that are new this time so the UI can celebrate them once.
#[derive(Clone)]
pub struct AchievementService {
    clock: Clock,
    achievements: Arc<dyn AchievementRepository>,
}

impl AchievementService {
    #[must_use]
    pub fn new(clock: Clock, achievements: Arc<dyn AchievementRepository>) -> Self {
        Self {
            clock,
            achievements,
        }
    }

    /// Records achievements for a finished course run.
    ///
    /// # Errors
    ///
    /// Returns `AchievementServiceError` for storage failures.
    pub async fn record_run(
        &self,
        user_id: UserId,
        course: &Course,
        result: QuizResult,
        classification: Classification,
    ) -> Result<Vec<AchievementId>, AchievementServiceError> {
        if !classification.passed {
            return Ok(Vec::new());
        }

        let earned_before = self.earned_ids(user_id).await?;
        let had_any_course = earned_before
            .iter()
            .any(|id| id.as_str().starts_with("course-"));

        let now = self.clock.now();
        let mut newly = Vec::new();

        let completed = course_completed_id(course)?;
        if self.achievements.grant(user_id, &completed, now).await? {
            newly.push(completed);
        }

        if !had_any_course {
            let first = AchievementId::new(FIRST_COURSE)?;
            if self.achievements.grant(user_id, &first, now).await? {
                newly.push(first);
            }
        }

        if result.percentage == 100 {
            let top = AchievementId::new(TOP_MARKS)?;
            if self.achievements.grant(user_id, &top, now).await? {
                newly.push(top);
            }
        }

        Ok(newly)
    }

    /// Records the certificate achievement.
    ///
    /// # Errors
    ///
    /// Returns `AchievementServiceError` for storage failures.
    pub async fn record_certificate(
        &self,
        user_id: UserId,
    ) -> Result<Option<AchievementId>, AchievementServiceError> {
        let certified = AchievementId::new(CERTIFIED)?;
        let newly = self
            .achievements
            .grant(user_id, &certified, self.clock.now())
            .await?;
        Ok(newly.then_some(certified))
    }

    /// Everything the user has earned, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AchievementServiceError` for storage failures.
    pub async fn earned(
        &self,
        user_id: UserId,
    ) -> Result<Vec<EarnedAchievement>, AchievementServiceError> {
        Ok(self.achievements.list_earned(user_id).await?)
    }

    /// Earned slugs as a set, for badge lookups.
    ///
    /// # Errors
    ///
    /// Returns `AchievementServiceError` for storage failures.
    pub async fn earned_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<AchievementId>, AchievementServiceError> {
        Ok(self
            .achievements
            .list_earned(user_id)
            .await?
            .into_iter()
            .map(|entry| entry.achievement_id)
            .collect())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::classify::classify;
    use academy_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;
    use uuid::Uuid;

    fn service() -> AchievementService {
        AchievementService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    fn course() -> Arc<Course> {
        Catalog::builtin().unwrap().courses()[0].clone()
    }

    fn user() -> UserId {
        UserId::new(Uuid::new_v4())
    }

    fn result(score: usize, total: usize, percentage: u8) -> QuizResult {
        QuizResult {
            score,
            total,
            percentage,
        }
    }

    #[tokio::test]
    async fn failed_runs_grant_nothing() {
        let service = service();
        let newly = service
            .record_run(user(), &course(), result(1, 4, 25), classify(25))
            .await
            .unwrap();
        assert!(newly.is_empty());
    }

    #[tokio::test]
    async fn first_pass_grants_course_and_first_course() {
        let service = service();
        let user_id = user();
        let newly = service
            .record_run(user_id, &course(), result(3, 4, 75), classify(75))
            .await
            .unwrap();

        let slugs: Vec<&str> = newly.iter().map(AchievementId::as_str).collect();
        assert_eq!(slugs, ["course-1-completed", FIRST_COURSE]);

        // Passing the same course again is quiet.
        let again = service
            .record_run(user_id, &course(), result(3, 4, 75), classify(75))
            .await
            .unwrap();
        assert!(again.is_empty());
    }

    #[tokio::test]
    async fn perfect_score_adds_top_marks() {
        let service = service();
        let newly = service
            .record_run(user(), &course(), result(4, 4, 100), classify(100))
            .await
            .unwrap();
        assert!(
            newly
                .iter()
                .any(|id| id.as_str() == TOP_MARKS)
        );
    }

    #[tokio::test]
    async fn certificate_achievement_is_granted_once() {
        let service = service();
        let user_id = user();
        assert!(service.record_certificate(user_id).await.unwrap().is_some());
        assert!(service.record_certificate(user_id).await.unwrap().is_none());
    }

    #[test]
    fn catalog_achievements_cover_every_course() {
        let catalog = Catalog::builtin().unwrap();
        let all = achievements_for_catalog(&catalog).unwrap();
        // Three built-ins plus one per course.
        assert_eq!(all.len(), 3 + catalog.len());
    }
}
