use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AchievementError {
    #[error("achievement id cannot be empty")]
    EmptyId,

    #[error("achievement id must be lowercase letters, digits and dashes: {0}")]
    InvalidId(String),

    #[error("achievement title cannot be empty")]
    EmptyTitle,
}

//
// ─── ACHIEVEMENT ID ────────────────────────────────────────────────────────────
//

/// Validated achievement slug (lowercase ASCII letters, digits, dashes).
///
/// Slugs are what the record store persists per user.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AchievementId(String);

impl AchievementId {
    /// Creates a validated achievement id.
    ///
    /// # Errors
    ///
    /// Returns `AchievementError::EmptyId` for a blank value and
    /// `AchievementError::InvalidId` for anything that is not a lowercase
    /// ASCII slug.
    pub fn new(value: impl Into<String>) -> Result<Self, AchievementError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(AchievementError::EmptyId);
        }
        let valid = raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(AchievementError::InvalidId(raw));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AchievementId({})", self.0)
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── ACHIEVEMENT ───────────────────────────────────────────────────────────────
//

/// A describable achievement: slug plus learner-facing title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    id: AchievementId,
    title: String,
    description: String,
}

impl Achievement {
    /// Creates an achievement description.
    ///
    /// # Errors
    ///
    /// Returns `AchievementError::EmptyTitle` if the title is blank.
    pub fn new(
        id: AchievementId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, AchievementError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(AchievementError::EmptyTitle);
        }
        Ok(Self {
            id,
            title: title.trim().to_owned(),
            description: description.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &AchievementId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
