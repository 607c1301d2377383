use thiserror::Error;

use crate::model::ids::CourseId;
use crate::model::lesson::Lesson;
use crate::model::quiz::Quiz;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course must contain at least one lesson")]
    NoLessons,
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A catalog course: ordered lessons followed by one final quiz.
///
/// Courses are immutable catalog data, built once at load time and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    description: Option<String>,
    lessons: Vec<Lesson>,
    quiz: Quiz,
}

impl Course {
    /// Creates a validated course from already-validated lessons and quiz.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the title is blank and
    /// `CourseError::NoLessons` if the lesson list is empty.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: Option<String>,
        lessons: Vec<Lesson>,
        quiz: Quiz,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if lessons.is_empty() {
            return Err(CourseError::NoLessons);
        }

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            description,
            lessons,
            quiz,
        })
    }

    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    /// Number of lessons; always at least one.
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Index of the last lesson.
    #[must_use]
    pub fn last_lesson_index(&self) -> usize {
        self.lessons.len() - 1
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quiz::Question;

    fn build_quiz() -> Quiz {
        let question = Question::new(
            "Where does crude oil form?",
            vec!["In porous rock".into(), "In tree trunks".into()],
            0,
        )
        .unwrap();
        Quiz::new("Check yourself", vec![question]).unwrap()
    }

    fn build_lesson(title: &str) -> Lesson {
        Lesson::new(title, "Lesson body.", None, None).unwrap()
    }

    #[test]
    fn course_rejects_empty_title() {
        let err = Course::new(
            CourseId::new(1),
            "   ",
            None,
            vec![build_lesson("One")],
            build_quiz(),
        )
        .unwrap_err();
        assert_eq!(err, CourseError::EmptyTitle);
    }

    #[test]
    fn course_rejects_missing_lessons() {
        let err = Course::new(CourseId::new(1), "Petroleum", None, vec![], build_quiz())
            .unwrap_err();
        assert_eq!(err, CourseError::NoLessons);
    }

    #[test]
    fn course_happy_path() {
        let course = Course::new(
            CourseId::new(7),
            "  Petroleum  ",
            Some("  How oil forms  ".into()),
            vec![build_lesson("One"), build_lesson("Two")],
            build_quiz(),
        )
        .unwrap();

        assert_eq!(course.id(), CourseId::new(7));
        assert_eq!(course.title(), "Petroleum");
        assert_eq!(course.description(), Some("How oil forms"));
        assert_eq!(course.lesson_count(), 2);
        assert_eq!(course.last_lesson_index(), 1);
        assert_eq!(course.lesson(1).unwrap().title(), "Two");
        assert!(course.lesson(2).is_none());
    }

    #[test]
    fn course_filters_blank_description() {
        let course = Course::new(
            CourseId::new(1),
            "Petroleum",
            Some("   ".into()),
            vec![build_lesson("One")],
            build_quiz(),
        )
        .unwrap();
        assert_eq!(course.description(), None);
    }
}
