use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must offer at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("question option cannot be empty")]
    EmptyOption,

    #[error("correct option {correct} is out of range for {len} options")]
    CorrectOutOfRange { correct: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single-choice question: a prompt, ordered options, and the index of the
/// correct option.
///
/// The correct index is validated against the option list at construction so
/// scoring never has to handle malformed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct: usize,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPrompt` if the prompt is blank,
    /// `QuizError::TooFewOptions` for fewer than two options,
    /// `QuizError::EmptyOption` if any option is blank, and
    /// `QuizError::CorrectOutOfRange` if `correct` does not index an option.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuizError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuizError::TooFewOptions { len: options.len() });
        }
        if options.iter().any(|option| option.trim().is_empty()) {
            return Err(QuizError::EmptyOption);
        }
        if correct >= options.len() {
            return Err(QuizError::CorrectOutOfRange {
                correct,
                len: options.len(),
            });
        }

        Ok(Self {
            prompt: prompt.trim().to_owned(),
            options: options.into_iter().map(|o| o.trim().to_owned()).collect(),
            correct,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Whether the given option index is the correct answer.
    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// The final test of a course: an ordered list of single-choice questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    title: String,
    questions: Vec<Question>,
}

impl Quiz {
    /// Creates a validated quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTitle` if the title is blank and
    /// `QuizError::NoQuestions` if no questions are given.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, QuizError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        Ok(Self {
            title: title.trim().to_owned(),
            questions,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions; always at least one.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn question_rejects_blank_prompt() {
        let err = Question::new("   ", options(&["a", "b"]), 0).unwrap_err();
        assert_eq!(err, QuizError::EmptyPrompt);
    }

    #[test]
    fn question_rejects_single_option() {
        let err = Question::new("Which one?", options(&["a"]), 0).unwrap_err();
        assert_eq!(err, QuizError::TooFewOptions { len: 1 });
    }

    #[test]
    fn question_rejects_blank_option() {
        let err = Question::new("Which one?", options(&["a", " "]), 0).unwrap_err();
        assert_eq!(err, QuizError::EmptyOption);
    }

    #[test]
    fn question_rejects_out_of_range_correct_index() {
        let err = Question::new("Which one?", options(&["a", "b"]), 2).unwrap_err();
        assert_eq!(err, QuizError::CorrectOutOfRange { correct: 2, len: 2 });
    }

    #[test]
    fn question_trims_and_answers() {
        let q = Question::new("  Which one?  ", options(&[" a ", "b"]), 1).unwrap();
        assert_eq!(q.prompt(), "Which one?");
        assert_eq!(q.options(), &["a".to_string(), "b".to_string()]);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn quiz_rejects_empty_title_and_questions() {
        let q = Question::new("Which one?", options(&["a", "b"]), 0).unwrap();
        assert_eq!(
            Quiz::new(" ", vec![q.clone()]).unwrap_err(),
            QuizError::EmptyTitle
        );
        assert_eq!(Quiz::new("Final test", vec![]).unwrap_err(), QuizError::NoQuestions);
    }

    #[test]
    fn quiz_happy_path() {
        let questions = vec![
            Question::new("One?", options(&["a", "b"]), 0).unwrap(),
            Question::new("Two?", options(&["a", "b", "c"]), 2).unwrap(),
        ];
        let quiz = Quiz::new("Final test", questions).unwrap();
        assert_eq!(quiz.question_count(), 2);
        assert_eq!(quiz.question(1).unwrap().correct(), 2);
        assert!(quiz.question(2).is_none());
    }
}
