use std::io;
use std::path::{Path, PathBuf};

use academy_core::Clock;
use academy_core::certificate::Certificate;
use academy_core::classify::certificate_eligible;
use academy_core::model::Course;
use academy_core::scoring::QuizResult;

use crate::error::CertificateIssueError;

/// A rendered certificate, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl IssuedCertificate {
    /// Writes the document into `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Issues certificates for eligible quiz results.
///
/// The eligibility gate lives here, on top of the pure renderer, so every
/// download path goes through the same check.
#[derive(Clone)]
pub struct CertificateService {
    clock: Clock,
}

impl CertificateService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Renders a certificate for the learner, dated by the service clock.
    ///
    /// # Errors
    ///
    /// Returns `CertificateIssueError::NotEligible` below the threshold and
    /// `CertificateIssueError::Render` for blank inputs.
    pub fn issue(
        &self,
        learner_name: &str,
        course: &Course,
        result: QuizResult,
    ) -> Result<IssuedCertificate, CertificateIssueError> {
        if !certificate_eligible(result.percentage) {
            return Err(CertificateIssueError::NotEligible {
                percentage: result.percentage,
            });
        }

        let issued_on = self.clock.now().date_naive();
        let certificate = Certificate::new(learner_name, course.title(), issued_on)?;
        Ok(IssuedCertificate {
            file_name: certificate.file_name(),
            bytes: certificate.render(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
