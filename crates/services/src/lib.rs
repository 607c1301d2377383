#![forbid(unsafe_code)]

pub mod achievements;
pub mod app_services;
pub mod auth;
pub mod catalog;
pub mod certificates;
pub mod course_run;
pub mod error;
pub mod flow;
pub mod identity_client;
pub mod profile_service;

pub use academy_core::Clock;

pub use achievements::{AchievementService, achievements_for_catalog, course_completed_id};
pub use app_services::AppServices;
pub use auth::{AuthService, IdentityProvider, InMemoryIdentityProvider, Session};
pub use catalog::Catalog;
pub use certificates::{CertificateService, IssuedCertificate};
pub use course_run::{CourseRun, QuizStep, RunProgress, RunStage};
pub use error::{
    AppServicesError, AuthError, CatalogError, CertificateIssueError, FlowError, RunError,
};
pub use flow::{CourseFlowService, RunCompletion};
pub use identity_client::{HttpIdentityProvider, IdentityConfig};
pub use profile_service::ProfileService;
