use std::collections::HashSet;

use academy_core::model::{AchievementId, CourseId};
use services::{Catalog, course_completed_id};

/// Everything a catalog card shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub lessons: usize,
    pub questions: usize,
    pub completed: bool,
}

/// Builds the card list for the catalog grid.
///
/// `earned` is `None` for a signed-out visitor; badges simply stay off.
#[must_use]
pub fn course_cards(catalog: &Catalog, earned: Option<&HashSet<AchievementId>>) -> Vec<CourseCardVm> {
    catalog
        .courses()
        .iter()
        .map(|course| {
            let completed = earned.is_some_and(|set| {
                course_completed_id(course)
                    .map(|id| set.contains(&id))
                    .unwrap_or(false)
            });
            CourseCardVm {
                id: course.id(),
                title: course.title().to_owned(),
                description: course.description().unwrap_or_default().to_owned(),
                lessons: course.lesson_count(),
                questions: course.quiz().question_count(),
                completed,
            }
        })
        .collect()
}
