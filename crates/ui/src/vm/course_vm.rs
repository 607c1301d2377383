use academy_core::classify::ResultTier;
use academy_core::scoring::QuizResult;
use services::course_run::{CourseRun, QuizStep};
use services::error::RunError;

/// Everything a learner can do inside the course overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunIntent {
    NextLesson,
    PrevLesson,
    SelectMini(usize),
    SelectOption(usize),
    NextQuestion,
    PrevQuestion,
    Retake,
    ReviewLessons,
}

/// Signals the view needs to react to beyond re-rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(QuizResult),
}

/// Message shown when the learner tries to advance an unanswered question.
pub const UNANSWERED_MESSAGE: &str = "Choose an answer before moving on.";

/// Wraps a `CourseRun` with the transient view state around it: the
/// validation message and the lesson self-check selection.
pub struct CourseRunVm {
    run: CourseRun,
    message: Option<&'static str>,
    mini_selected: Option<usize>,
}

impl CourseRunVm {
    #[must_use]
    pub fn new(run: CourseRun) -> Self {
        Self {
            run,
            message: None,
            mini_selected: None,
        }
    }

    #[must_use]
    pub fn run(&self) -> &CourseRun {
        &self.run
    }

    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    #[must_use]
    pub fn mini_selected(&self) -> Option<usize> {
        self.mini_selected
    }

    /// Whether the current lesson's self-check was answered correctly.
    #[must_use]
    pub fn mini_feedback(&self) -> Option<bool> {
        let selected = self.mini_selected?;
        let question = self.run.current_lesson()?.mini_question()?;
        Some(question.is_correct(selected))
    }

    /// Applies one intent to the run, translating run errors into the
    /// transient message.
    pub fn apply(&mut self, intent: RunIntent) -> Option<RunOutcome> {
        match intent {
            RunIntent::NextLesson => {
                self.run.advance_lesson();
                self.mini_selected = None;
                self.message = None;
            }
            RunIntent::PrevLesson => {
                self.run.retreat_lesson();
                self.mini_selected = None;
                self.message = None;
            }
            RunIntent::SelectMini(option) => {
                self.mini_selected = Some(option);
            }
            RunIntent::SelectOption(option) => {
                if self.run.select_answer(option).is_ok() {
                    self.message = None;
                }
            }
            RunIntent::NextQuestion => match self.run.next_question() {
                Ok(QuizStep::Scored(result)) => {
                    self.message = None;
                    return Some(RunOutcome::Completed(result));
                }
                Ok(QuizStep::Question(_)) => {
                    self.message = None;
                }
                Err(RunError::Unanswered { .. }) => {
                    self.message = Some(UNANSWERED_MESSAGE);
                }
                Err(_) => {}
            },
            RunIntent::PrevQuestion => {
                if self.run.previous_question().is_ok() {
                    self.message = None;
                }
            }
            RunIntent::Retake => {
                if self.run.retake_quiz().is_ok() {
                    self.message = None;
                }
            }
            RunIntent::ReviewLessons => {
                if self.run.review_lessons().is_ok() {
                    self.mini_selected = None;
                    self.message = None;
                }
            }
        }
        None
    }
}

/// Learner-facing wording for each result tier.
#[must_use]
pub fn tier_message(tier: ResultTier) -> &'static str {
    match tier {
        ResultTier::Excellent => "Outstanding! You know this like a real engineer.",
        ResultTier::Good => "Great work! Just a little more practice to perfection.",
        ResultTier::Passed => "Not bad! Reread the lessons and try for a better score.",
        ResultTier::NeedsReview => "Let's go through the lessons once more. You'll get it!",
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
