use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use academy_core::answers::AnswerSheet;
use academy_core::classify::{Classification, certificate_eligible, classify};
use academy_core::model::{Course, CourseId, Lesson, Question};
use academy_core::scoring::{QuizResult, score};

use crate::error::RunError;

//
// ─── STAGE ─────────────────────────────────────────────────────────────────────
//

/// Mutually exclusive mode of a course run.
///
/// One tagged value instead of independent flags, so the flow can never be
/// in two modes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Lesson,
    Quiz,
    Results,
}

/// Where the run ended up after a forward step through the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the question at this index.
    Question(usize),
    /// The last answer was in; the quiz has been scored.
    Scored(QuizResult),
}

/// Aggregated view of run progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunProgress {
    pub stage: RunStage,
    pub lesson_index: usize,
    pub lessons_total: usize,
    pub question_index: usize,
    pub questions_total: usize,
    pub answered: usize,
}

//
// ─── COURSE RUN ────────────────────────────────────────────────────────────────
//

/// In-memory state of one pass through a course: lessons, then the quiz,
/// then results.
///
/// A run owns its answer sheet and result; both are discarded with the run
/// when the overlay closes or the active course changes. A freshly built run
/// always starts at lesson 0 in `Lesson` stage, which is also how the reset
/// on a course change works: the UI constructs a new run per course.
pub struct CourseRun {
    course: Arc<Course>,
    stage: RunStage,
    lesson_index: usize,
    question_index: usize,
    answers: AnswerSheet,
    result: Option<QuizResult>,
    started_at: DateTime<Utc>,
}

impl CourseRun {
    /// Creates a run positioned at the first lesson.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    #[must_use]
    pub fn new(course: Arc<Course>, started_at: DateTime<Utc>) -> Self {
        Self {
            course,
            stage: RunStage::Lesson,
            lesson_index: 0,
            question_index: 0,
            answers: AnswerSheet::new(),
            result: None,
            started_at,
        }
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course.id()
    }

    #[must_use]
    pub fn stage(&self) -> RunStage {
        self.stage
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    // ── Lessons ──

    #[must_use]
    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<&Lesson> {
        match self.stage {
            RunStage::Lesson => self.course.lesson(self.lesson_index),
            RunStage::Quiz | RunStage::Results => None,
        }
    }

    #[must_use]
    pub fn is_last_lesson(&self) -> bool {
        self.lesson_index == self.course.last_lesson_index()
    }

    /// Steps forward through the lessons.
    ///
    /// On the last lesson this switches the run into `Quiz` stage without
    /// moving the index, so the index never leaves the lesson range.
    /// Outside `Lesson` stage this is a no-op.
    pub fn advance_lesson(&mut self) {
        if self.stage != RunStage::Lesson {
            return;
        }
        if self.lesson_index < self.course.last_lesson_index() {
            self.lesson_index += 1;
        } else {
            self.enter_quiz();
        }
    }

    /// Steps back through the lessons; a no-op at the first lesson or
    /// outside `Lesson` stage.
    pub fn retreat_lesson(&mut self) {
        if self.stage == RunStage::Lesson && self.lesson_index > 0 {
            self.lesson_index -= 1;
        }
    }

    // ── Quiz ──

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.stage {
            RunStage::Quiz => self.course.quiz().question(self.question_index),
            RunStage::Lesson | RunStage::Results => None,
        }
    }

    /// The recorded answer for the current question, if any.
    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.answers.answer(self.question_index)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Records an option for the current question, replacing any earlier
    /// pick.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NotInQuiz` outside `Quiz` stage and
    /// `RunError::OptionOutOfRange` when the option does not exist on the
    /// current question.
    pub fn select_answer(&mut self, option: usize) -> Result<(), RunError> {
        let Some(question) = self.current_question() else {
            return Err(RunError::NotInQuiz);
        };
        if option >= question.option_count() {
            return Err(RunError::OptionOutOfRange {
                index: self.question_index,
                option,
            });
        }
        self.answers.select(self.question_index, option);
        Ok(())
    }

    /// Moves to the next question, or scores the quiz after the last one.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Unanswered` if the current question (or, on
    /// submission, any question) has no recorded answer; the learner picks
    /// an option and tries again. Returns `RunError::NotInQuiz` outside
    /// `Quiz` stage.
    pub fn next_question(&mut self) -> Result<QuizStep, RunError> {
        if self.stage != RunStage::Quiz {
            return Err(RunError::NotInQuiz);
        }
        if self.selected_answer().is_none() {
            return Err(RunError::Unanswered {
                index: self.question_index,
            });
        }

        let total = self.course.quiz().question_count();
        if self.question_index + 1 < total {
            self.question_index += 1;
            return Ok(QuizStep::Question(self.question_index));
        }

        // Submitting: the whole sheet must be filled in.
        if let Some(index) = self.answers.first_unanswered(total) {
            return Err(RunError::Unanswered { index });
        }

        let result = score(self.course.quiz(), &self.answers);
        self.result = Some(result);
        self.stage = RunStage::Results;
        Ok(QuizStep::Scored(result))
    }

    /// Moves back to the previous question; a no-op at the first question.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NotInQuiz` outside `Quiz` stage.
    pub fn previous_question(&mut self) -> Result<(), RunError> {
        if self.stage != RunStage::Quiz {
            return Err(RunError::NotInQuiz);
        }
        if self.question_index > 0 {
            self.question_index -= 1;
        }
        Ok(())
    }

    // ── Results ──

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }

    /// Classification of the result, once there is one.
    #[must_use]
    pub fn classification(&self) -> Option<Classification> {
        self.result.map(|result| classify(result.percentage))
    }

    /// Whether the run has a result good enough for a certificate.
    #[must_use]
    pub fn certificate_eligible(&self) -> bool {
        self.result
            .is_some_and(|result| certificate_eligible(result.percentage))
    }

    /// Starts the quiz over from the results screen.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NotInResults` unless the run is in `Results` stage.
    pub fn retake_quiz(&mut self) -> Result<(), RunError> {
        if self.stage != RunStage::Results {
            return Err(RunError::NotInResults);
        }
        self.enter_quiz();
        Ok(())
    }

    /// Goes back to the first lesson from the results screen.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NotInResults` unless the run is in `Results` stage.
    pub fn review_lessons(&mut self) -> Result<(), RunError> {
        if self.stage != RunStage::Results {
            return Err(RunError::NotInResults);
        }
        self.stage = RunStage::Lesson;
        self.lesson_index = 0;
        Ok(())
    }

    #[must_use]
    pub fn progress(&self) -> RunProgress {
        RunProgress {
            stage: self.stage,
            lesson_index: self.lesson_index,
            lessons_total: self.course.lesson_count(),
            question_index: self.question_index,
            questions_total: self.course.quiz().question_count(),
            answered: self.answers.answered_count(),
        }
    }

    fn enter_quiz(&mut self) {
        self.stage = RunStage::Quiz;
        self.question_index = 0;
        self.answers.clear();
        self.result = None;
    }
}

impl fmt::Debug for CourseRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseRun")
            .field("course_id", &self.course.id())
            .field("stage", &self.stage)
            .field("lesson_index", &self.lesson_index)
            .field("question_index", &self.question_index)
            .field("answered", &self.answers.answered_count())
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::classify::ResultTier;
    use academy_core::model::{Lesson, Quiz};
    use academy_core::time::fixed_now;

    fn build_course(id: u64, lessons: usize, correct: &[usize]) -> Arc<Course> {
        let lessons = (0..lessons)
            .map(|i| Lesson::new(format!("Lesson {i}"), "Body.", None, None).unwrap())
            .collect();
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &answer)| {
                Question::new(
                    format!("Question {i}?"),
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    answer,
                )
                .unwrap()
            })
            .collect();
        let quiz = Quiz::new("Final test", questions).unwrap();
        Arc::new(Course::new(CourseId::new(id), format!("Course {id}"), None, lessons, quiz).unwrap())
    }

    fn answer_and_advance(run: &mut CourseRun, option: usize) -> QuizStep {
        run.select_answer(option).unwrap();
        run.next_question().unwrap()
    }

    #[test]
    fn run_starts_at_lesson_zero() {
        let run = CourseRun::new(build_course(1, 3, &[0]), fixed_now());
        assert_eq!(run.stage(), RunStage::Lesson);
        assert_eq!(run.lesson_index(), 0);
        assert_eq!(run.current_lesson().unwrap().title(), "Lesson 0");
    }

    #[test]
    fn walker_stays_within_bounds() {
        let mut run = CourseRun::new(build_course(1, 3, &[0]), fixed_now());

        run.retreat_lesson();
        assert_eq!(run.lesson_index(), 0);

        run.advance_lesson();
        run.advance_lesson();
        assert_eq!(run.lesson_index(), 2);
        assert!(run.is_last_lesson());

        // Advancing at the last lesson switches stage, never the index.
        run.advance_lesson();
        assert_eq!(run.stage(), RunStage::Quiz);
        assert_eq!(run.lesson_index(), 2);

        // Lesson operations are no-ops outside Lesson stage.
        run.advance_lesson();
        run.retreat_lesson();
        assert_eq!(run.stage(), RunStage::Quiz);
        assert_eq!(run.lesson_index(), 2);
    }

    #[test]
    fn a_new_run_for_a_different_course_starts_over() {
        let mut run = CourseRun::new(build_course(1, 2, &[0]), fixed_now());
        run.advance_lesson();
        assert_eq!(run.lesson_index(), 1);

        let run = CourseRun::new(build_course(2, 2, &[0]), fixed_now());
        assert_eq!(run.course_id(), CourseId::new(2));
        assert_eq!(run.lesson_index(), 0);
        assert_eq!(run.stage(), RunStage::Lesson);
        assert!(run.answers().is_empty());
    }

    #[test]
    fn advancing_an_unanswered_question_is_blocked() {
        let mut run = CourseRun::new(build_course(1, 1, &[0, 1]), fixed_now());
        run.advance_lesson();
        assert_eq!(run.stage(), RunStage::Quiz);

        let err = run.next_question().unwrap_err();
        assert_eq!(err, RunError::Unanswered { index: 0 });

        // Recoverable: select an option and try again.
        run.select_answer(0).unwrap();
        assert_eq!(run.next_question().unwrap(), QuizStep::Question(1));
    }

    #[test]
    fn selecting_an_out_of_range_option_fails() {
        let mut run = CourseRun::new(build_course(1, 1, &[0]), fixed_now());
        run.advance_lesson();
        let err = run.select_answer(9).unwrap_err();
        assert_eq!(err, RunError::OptionOutOfRange { index: 0, option: 9 });
    }

    #[test]
    fn quiz_operations_outside_quiz_stage_fail() {
        let mut run = CourseRun::new(build_course(1, 1, &[0]), fixed_now());
        assert_eq!(run.select_answer(0).unwrap_err(), RunError::NotInQuiz);
        assert_eq!(run.next_question().unwrap_err(), RunError::NotInQuiz);
        assert!(run.current_question().is_none());
    }

    #[test]
    fn three_of_four_scores_good_and_eligible() {
        let mut run = CourseRun::new(build_course(1, 1, &[1, 0, 2, 3]), fixed_now());
        run.advance_lesson();

        answer_and_advance(&mut run, 1);
        answer_and_advance(&mut run, 0);
        answer_and_advance(&mut run, 2);
        let step = answer_and_advance(&mut run, 1);

        let QuizStep::Scored(result) = step else {
            panic!("expected the quiz to be scored");
        };
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 4);
        assert_eq!(result.percentage, 75);
        assert_eq!(run.stage(), RunStage::Results);

        let classification = run.classification().unwrap();
        assert_eq!(classification.tier, ResultTier::Good);
        assert!(classification.passed);
        assert!(run.certificate_eligible());
    }

    #[test]
    fn all_wrong_needs_review_and_is_not_eligible() {
        let mut run = CourseRun::new(build_course(1, 1, &[0, 1]), fixed_now());
        run.advance_lesson();

        answer_and_advance(&mut run, 1);
        let step = answer_and_advance(&mut run, 0);

        let QuizStep::Scored(result) = step else {
            panic!("expected the quiz to be scored");
        };
        assert_eq!(result.score, 0);
        assert_eq!(result.percentage, 0);
        assert_eq!(run.classification().unwrap().tier, ResultTier::NeedsReview);
        assert!(!run.certificate_eligible());
    }

    #[test]
    fn stepping_back_allows_changing_an_answer() {
        let mut run = CourseRun::new(build_course(1, 1, &[0, 1]), fixed_now());
        run.advance_lesson();

        answer_and_advance(&mut run, 1); // wrong
        run.previous_question().unwrap();
        assert_eq!(run.question_index(), 0);
        assert_eq!(run.selected_answer(), Some(1));

        run.select_answer(0).unwrap(); // fixed
        run.next_question().unwrap();
        let step = answer_and_advance(&mut run, 1);
        let QuizStep::Scored(result) = step else {
            panic!("expected the quiz to be scored");
        };
        assert_eq!(result.score, 2);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn retake_clears_the_sheet_and_result() {
        let mut run = CourseRun::new(build_course(1, 1, &[0]), fixed_now());
        run.advance_lesson();
        answer_and_advance(&mut run, 0);
        assert_eq!(run.stage(), RunStage::Results);
        assert!(run.result().is_some());

        run.retake_quiz().unwrap();
        assert_eq!(run.stage(), RunStage::Quiz);
        assert_eq!(run.question_index(), 0);
        assert!(run.answers().is_empty());
        assert!(run.result().is_none());
    }

    #[test]
    fn review_lessons_returns_to_the_first_lesson() {
        let mut run = CourseRun::new(build_course(1, 2, &[0]), fixed_now());
        assert_eq!(run.review_lessons().unwrap_err(), RunError::NotInResults);

        run.advance_lesson();
        run.advance_lesson();
        answer_and_advance(&mut run, 0);

        run.review_lessons().unwrap();
        assert_eq!(run.stage(), RunStage::Lesson);
        assert_eq!(run.lesson_index(), 0);
    }

    #[test]
    fn progress_reflects_the_run() {
        let mut run = CourseRun::new(build_course(1, 2, &[0, 1]), fixed_now());
        let progress = run.progress();
        assert_eq!(progress.stage, RunStage::Lesson);
        assert_eq!(progress.lessons_total, 2);
        assert_eq!(progress.questions_total, 2);

        run.advance_lesson();
        run.advance_lesson();
        run.select_answer(0).unwrap();
        let progress = run.progress();
        assert_eq!(progress.stage, RunStage::Quiz);
        assert_eq!(progress.answered, 1);
    }
}
