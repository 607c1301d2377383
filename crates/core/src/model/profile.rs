use thiserror::Error;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("display name cannot be empty")]
    EmptyDisplayName,

    #[error("grade level must be between 1 and 11, got {0}")]
    InvalidGradeLevel(u8),
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// Learner profile fields kept in the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    user_id: UserId,
    display_name: String,
    grade_level: Option<u8>,
}

impl Profile {
    /// Creates a validated profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyDisplayName` for a blank name and
    /// `ProfileError::InvalidGradeLevel` for a grade outside 1..=11.
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        grade_level: Option<u8>,
    ) -> Result<Self, ProfileError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(ProfileError::EmptyDisplayName);
        }
        if let Some(grade) = grade_level {
            if !(1..=11).contains(&grade) {
                return Err(ProfileError::InvalidGradeLevel(grade));
            }
        }

        Ok(Self {
            user_id,
            display_name: display_name.trim().to_owned(),
            grade_level,
        })
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn grade_level(&self) -> Option<u8> {
        self.grade_level
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
