use chrono::{Datelike, NaiveDate};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("learner name cannot be empty")]
    EmptyLearnerName,

    #[error("course title cannot be empty")]
    EmptyCourseTitle,
}

//
// ─── CERTIFICATE ───────────────────────────────────────────────────────────────
//

/// A course-completion certificate rendered as a single-page SVG document.
///
/// Rendering is deterministic: the same name, course title, and issue date
/// always produce byte-for-byte identical output. There are no timestamps
/// beyond the issue date and no randomness in the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    learner_name: String,
    course_title: String,
    issued_on: NaiveDate,
}

impl Certificate {
    /// Creates a certificate from trimmed, non-empty inputs.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::EmptyLearnerName` or
    /// `CertificateError::EmptyCourseTitle` when the respective field is
    /// blank.
    pub fn new(
        learner_name: impl Into<String>,
        course_title: impl Into<String>,
        issued_on: NaiveDate,
    ) -> Result<Self, CertificateError> {
        let learner_name = learner_name.into();
        if learner_name.trim().is_empty() {
            return Err(CertificateError::EmptyLearnerName);
        }
        let course_title = course_title.into();
        if course_title.trim().is_empty() {
            return Err(CertificateError::EmptyCourseTitle);
        }

        Ok(Self {
            learner_name: learner_name.trim().to_owned(),
            course_title: course_title.trim().to_owned(),
            issued_on,
        })
    }

    #[must_use]
    pub fn learner_name(&self) -> &str {
        &self.learner_name
    }

    #[must_use]
    pub fn course_title(&self) -> &str {
        &self.course_title
    }

    #[must_use]
    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    /// Renders the fixed single-page layout (A4 landscape at 96 dpi).
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let name = xml_escape(&self.learner_name);
        let course = xml_escape(&self.course_title);
        let date = xml_escape(&format_issue_date(self.issued_on));

        let svg = format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="1123" height="794" viewBox="0 0 1123 794">
  <rect x="0" y="0" width="1123" height="794" fill="#fdf9f0"/>
  <rect x="28" y="28" width="1067" height="738" fill="none" stroke="#1c3f60" stroke-width="6"/>
  <rect x="44" y="44" width="1035" height="706" fill="none" stroke="#c8a24a" stroke-width="2"/>
  <text x="561.5" y="150" text-anchor="middle" font-family="Georgia, serif" font-size="52" fill="#1c3f60" letter-spacing="6">CERTIFICATE</text>
  <text x="561.5" y="200" text-anchor="middle" font-family="Georgia, serif" font-size="24" fill="#1c3f60" letter-spacing="3">OF ACHIEVEMENT</text>
  <text x="561.5" y="300" text-anchor="middle" font-family="Georgia, serif" font-size="20" fill="#4a4a4a">This certificate is proudly presented to</text>
  <text x="561.5" y="380" text-anchor="middle" font-family="Georgia, serif" font-size="44" fill="#1c3f60">{name}</text>
  <line x1="280" y1="404" x2="843" y2="404" stroke="#c8a24a" stroke-width="2"/>
  <text x="561.5" y="470" text-anchor="middle" font-family="Georgia, serif" font-size="20" fill="#4a4a4a">for completing the course</text>
  <text x="561.5" y="530" text-anchor="middle" font-family="Georgia, serif" font-size="30" fill="#1c3f60">{course}</text>
  <text x="561.5" y="640" text-anchor="middle" font-family="Georgia, serif" font-size="18" fill="#4a4a4a">Issued on {date}</text>
  <text x="561.5" y="710" text-anchor="middle" font-family="Georgia, serif" font-size="16" fill="#8a8a8a">Oilfield Academy</text>
</svg>
"##
        );

        svg.into_bytes()
    }

    /// File name derived from the course title, e.g.
    /// `certificate-what-is-petroleum.svg`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("certificate-{}.svg", slug(&self.course_title))
    }
}

fn format_issue_date(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_dash = true;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            previous_dash = false;
        } else if !previous_dash {
            out.push('-');
            previous_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("course");
    }
    out
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
