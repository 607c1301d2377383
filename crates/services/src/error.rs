//! Shared error types for the services crate.

use thiserror::Error;

use academy_core::certificate::CertificateError as CertificateRenderError;
use academy_core::model::{
    AchievementError, CourseError, CourseId, LessonError, ProfileError, QuizError,
};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading and validating the course catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate course id: {0}")]
    DuplicateCourseId(CourseId),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by the course run state machine.
///
/// `Unanswered` is the only one a learner can trigger through the UI; it is
/// transient and clears as soon as an option is selected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunError {
    #[error("question {index} has no answer yet")]
    Unanswered { index: usize },

    #[error("option {option} is out of range for question {index}")]
    OptionOutOfRange { index: usize, option: usize },

    #[error("no quiz in progress")]
    NotInQuiz,

    #[error("no results to act on")]
    NotInResults,
}

/// Errors emitted by the auth service and identity providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,
    #[error("not signed in")]
    NotSignedIn,
    #[error("identity request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Errors emitted by `AchievementService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AchievementServiceError {
    #[error(transparent)]
    Achievement(#[from] AchievementError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while issuing a certificate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateIssueError {
    #[error("score of {percentage}% is below the certificate threshold")]
    NotEligible { percentage: u8 },
    #[error(transparent)]
    Render(#[from] CertificateRenderError),
}

/// Errors emitted by `CourseFlowService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    #[error("course {0} is not in the catalog")]
    UnknownCourse(CourseId),
    #[error("the quiz has not been completed")]
    NotCompleted,
    #[error(transparent)]
    Achievements(#[from] AchievementServiceError),
    #[error(transparent)]
    Profile(#[from] ProfileServiceError),
    #[error(transparent)]
    Certificate(#[from] CertificateIssueError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
