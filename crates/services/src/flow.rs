use std::sync::Arc;

use academy_core::Clock;
use academy_core::classify::Classification;
use academy_core::model::{AchievementId, CourseId};
use academy_core::scoring::QuizResult;

use crate::achievements::AchievementService;
use crate::auth::Session;
use crate::catalog::Catalog;
use crate::certificates::{CertificateService, IssuedCertificate};
use crate::course_run::CourseRun;
use crate::error::FlowError;
use crate::profile_service::ProfileService;

/// What came out of a finished run, for the results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCompletion {
    pub result: QuizResult,
    pub classification: Classification,
    pub certificate_eligible: bool,
    pub newly_earned: Vec<AchievementId>,
}

/// Orchestrates course runs against the catalog and the record store.
///
/// The run itself stays pure and synchronous; this service owns the async
/// edges (achievements, certificates) that fire when a run completes.
pub struct CourseFlowService {
    clock: Clock,
    catalog: Arc<Catalog>,
    achievements: Arc<AchievementService>,
    certificates: CertificateService,
    profiles: Arc<ProfileService>,
}

impl CourseFlowService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<Catalog>,
        achievements: Arc<AchievementService>,
        certificates: CertificateService,
        profiles: Arc<ProfileService>,
    ) -> Self {
        Self {
            clock,
            catalog,
            achievements,
            certificates,
            profiles,
        }
    }

    /// Builds a fresh run for the course, positioned at the first lesson.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::UnknownCourse` for a stale or unknown id.
    pub fn start(&self, course_id: CourseId) -> Result<CourseRun, FlowError> {
        let course = self
            .catalog
            .course(course_id)
            .ok_or(FlowError::UnknownCourse(course_id))?;
        Ok(CourseRun::new(course.clone(), self.clock.now()))
    }

    /// Records a finished run for the signed-in learner.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotCompleted` while the run has no result, and
    /// storage errors from the achievement grants.
    pub async fn complete(
        &self,
        run: &CourseRun,
        session: &Session,
    ) -> Result<RunCompletion, FlowError> {
        let result = run.result().ok_or(FlowError::NotCompleted)?;
        let classification = run.classification().ok_or(FlowError::NotCompleted)?;

        let newly_earned = self
            .achievements
            .record_run(session.user_id(), run.course(), result, classification)
            .await?;

        Ok(RunCompletion {
            result,
            classification,
            certificate_eligible: run.certificate_eligible(),
            newly_earned,
        })
    }

    /// Renders the certificate for a finished, eligible run.
    ///
    /// The learner name comes from the stored profile (created from the
    /// session on first use). Also records the certificate achievement.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotCompleted` without a result, and the
    /// eligibility, profile, and storage errors underneath.
    pub async fn issue_certificate(
        &self,
        run: &CourseRun,
        session: &Session,
    ) -> Result<IssuedCertificate, FlowError> {
        let result = run.result().ok_or(FlowError::NotCompleted)?;

        let profile = self.profiles.ensure(session).await?;
        let issued = self
            .certificates
            .issue(profile.display_name(), run.course(), result)?;

        self.achievements
            .record_certificate(session.user_id())
            .await?;

        Ok(issued)
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}
