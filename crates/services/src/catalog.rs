use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use academy_core::model::{Course, CourseId, Illustration, Lesson, Question, Quiz};

use crate::error::CatalogError;

/// The built-in catalog shipped with the application.
const DEFAULT_CATALOG: &str = include_str!("../assets/default_catalog.json");

//
// ─── RAW RECORDS ───────────────────────────────────────────────────────────────
//

// Serde shapes for the catalog document. Validation happens when the records
// are turned into domain types, so a malformed catalog fails the load instead
// of surfacing at scoring time.

#[derive(Debug, Deserialize)]
struct CatalogDoc {
    courses: Vec<CourseRecord>,
}

#[derive(Debug, Deserialize)]
struct CourseRecord {
    id: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    lessons: Vec<LessonRecord>,
    quiz: QuizRecord,
}

#[derive(Debug, Deserialize)]
struct LessonRecord {
    title: String,
    body: String,
    #[serde(default)]
    illustration: Option<String>,
    #[serde(default)]
    mini_question: Option<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuizRecord {
    title: String,
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    prompt: String,
    options: Vec<String>,
    correct: usize,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The static course catalog: loaded once at startup, read-only afterwards.
///
/// Courses keep their document order and are shared behind `Arc` so a course
/// run can hold one without cloning lesson bodies.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Arc<Course>>,
}

impl Catalog {
    /// Parses and validates a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for unparseable JSON, duplicate course ids, or
    /// any domain validation failure.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDoc = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        let mut courses = Vec::with_capacity(doc.courses.len());
        for record in doc.courses {
            let course = course_from_record(record)?;
            if !seen.insert(course.id()) {
                return Err(CatalogError::DuplicateCourseId(course.id()));
            }
            courses.push(Arc::new(course));
        }

        log::info!("catalog loaded with {} courses", courses.len());
        Ok(Self { courses })
    }

    /// Loads and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, plus everything
    /// `from_json` can return.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The catalog embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded document fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG)
    }

    #[must_use]
    pub fn courses(&self) -> &[Arc<Course>] {
        &self.courses
    }

    /// Looks up a course by id; `None` for stale or unknown references.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Arc<Course>> {
        self.courses.iter().find(|course| course.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

fn course_from_record(record: CourseRecord) -> Result<Course, CatalogError> {
    let mut lessons = Vec::with_capacity(record.lessons.len());
    for lesson in record.lessons {
        lessons.push(lesson_from_record(lesson)?);
    }

    let mut questions = Vec::with_capacity(record.quiz.questions.len());
    for question in record.quiz.questions {
        questions.push(question_from_record(question)?);
    }
    let quiz = Quiz::new(record.quiz.title, questions)?;

    Ok(Course::new(
        CourseId::new(record.id),
        record.title,
        record.description,
        lessons,
        quiz,
    )?)
}

fn lesson_from_record(record: LessonRecord) -> Result<Lesson, CatalogError> {
    let illustration = record
        .illustration
        .as_deref()
        .map(Illustration::new)
        .transpose()?;
    let mini_question = record
        .mini_question
        .map(question_from_record)
        .transpose()?;
    Ok(Lesson::new(
        record.title,
        record.body,
        illustration,
        mini_question,
    )?)
}

fn question_from_record(record: QuestionRecord) -> Result<Question, CatalogError> {
    Ok(Question::new(record.prompt, record.options, record.correct)?)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        for course in catalog.courses() {
            assert!(course.lesson_count() >= 1);
            assert!(course.quiz().question_count() >= 1);
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();
        let first = &catalog.courses()[0];
        assert_eq!(catalog.course(first.id()).unwrap().id(), first.id());
        assert!(catalog.course(CourseId::new(9999)).is_none());
    }

    #[test]
    fn rejects_duplicate_course_ids() {
        let json = r#"{
            "courses": [
                {
                    "id": 1,
                    "title": "A",
                    "lessons": [{"title": "L", "body": "b"}],
                    "quiz": {"title": "Q", "questions": [
                        {"prompt": "P?", "options": ["x", "y"], "correct": 0}
                    ]}
                },
                {
                    "id": 1,
                    "title": "B",
                    "lessons": [{"title": "L", "body": "b"}],
                    "quiz": {"title": "Q", "questions": [
                        {"prompt": "P?", "options": ["x", "y"], "correct": 0}
                    ]}
                }
            ]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourseId(id) if id == CourseId::new(1)));
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let json = r#"{
            "courses": [
                {
                    "id": 1,
                    "title": "A",
                    "lessons": [{"title": "L", "body": "b"}],
                    "quiz": {"title": "Q", "questions": [
                        {"prompt": "P?", "options": ["x", "y"], "correct": 5}
                    ]}
                }
            ]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::Quiz(_)));
    }

    #[test]
    fn rejects_unparseable_document() {
        assert!(matches!(
            Catalog::from_json("{ not json").unwrap_err(),
            CatalogError::Parse(_)
        ));
    }
}
