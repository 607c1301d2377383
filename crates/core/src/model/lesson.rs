use thiserror::Error;
use url::Url;

use crate::model::quiz::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson body cannot be empty")]
    EmptyBody,

    #[error("lesson illustration must be an http(s) url: {0}")]
    InvalidIllustration(String),
}

//
// ─── ILLUSTRATION ──────────────────────────────────────────────────────────────
//

/// Validated link to a lesson illustration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Illustration(Url);

impl Illustration {
    /// Parses and validates an illustration link.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::InvalidIllustration` unless the value is a
    /// well-formed http(s) URL.
    pub fn new(raw: &str) -> Result<Self, LessonError> {
        let url = Url::parse(raw).map_err(|_| LessonError::InvalidIllustration(raw.to_owned()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(LessonError::InvalidIllustration(raw.to_owned()));
        }
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// A single lesson: a title, a markdown body, an optional illustration, and
/// an optional embedded self-check question.
///
/// Lessons are ordered within a course; the order is significant. The
/// embedded question is never scored; it only gives instant feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    title: String,
    body: String,
    illustration: Option<Illustration>,
    mini_question: Option<Question>,
}

impl Lesson {
    /// Creates a validated lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` or `LessonError::EmptyBody` when the
    /// respective field is blank after trimming.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        illustration: Option<Illustration>,
        mini_question: Option<Question>,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        let body = body.into();
        if body.trim().is_empty() {
            return Err(LessonError::EmptyBody);
        }

        Ok(Self {
            title: title.trim().to_owned(),
            body,
            illustration,
            mini_question,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markdown source of the lesson body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn illustration(&self) -> Option<&Illustration> {
        self.illustration.as_ref()
    }

    #[must_use]
    pub fn mini_question(&self) -> Option<&Question> {
        self.mini_question.as_ref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
