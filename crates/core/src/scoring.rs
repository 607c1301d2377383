use crate::answers::AnswerSheet;
use crate::model::Quiz;

/// Outcome of one quiz attempt.
///
/// Derived data: recomputed on every submission, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    /// Count of correctly answered questions.
    pub score: usize,
    /// Question count of the quiz; always at least one.
    pub total: usize,
    /// `round(score / total * 100)`, rounded half up.
    pub percentage: u8,
}

/// Scores an answer sheet against a quiz.
///
/// Counts the questions whose recorded answer matches the correct option.
/// Unanswered questions count as incorrect; the surrounding flow blocks
/// submission while the sheet has holes, so that case is unreachable through
/// the UI. Pure and idempotent.
#[must_use]
pub fn score(quiz: &Quiz, answers: &AnswerSheet) -> QuizResult {
    let total = quiz.question_count();
    let score = quiz
        .questions()
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            answers
                .answer(*index)
                .is_some_and(|selected| question.is_correct(selected))
        })
        .count();

    QuizResult {
        score,
        total,
        percentage: percentage(score, total),
    }
}

/// Integer round-half-up of `score / total * 100`.
///
/// `total` is a validated quiz question count and therefore non-zero.
fn percentage(score: usize, total: usize) -> u8 {
    let rounded = (200 * score + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn quiz_with_correct(correct: &[usize]) -> Quiz {
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
        Quiz::new("Final test", questions).unwrap()
    }

    fn sheet(answers: &[usize]) -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for (index, &option) in answers.iter().enumerate() {
            sheet.select(index, option);
        }
        sheet
    }

    #[test]
    fn three_of_four_rounds_to_seventy_five() {
        let quiz = quiz_with_correct(&[1, 0, 2, 3]);
        let result = score(&quiz, &sheet(&[1, 0, 2, 1]));
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 4);
        assert_eq!(result.percentage, 75);
    }

    #[test]
    fn all_wrong_scores_zero() {
        let quiz = quiz_with_correct(&[0, 1]);
        let result = score(&quiz, &sheet(&[1, 0]));
        assert_eq!(result.score, 0);
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn perfect_sheet_scores_hundred() {
        let quiz = quiz_with_correct(&[2, 2, 0]);
        let result = score(&quiz, &sheet(&[2, 2, 0]));
        assert_eq!(result.score, 3);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn halves_round_up() {
        // 1/8 = 12.5% -> 13
        let quiz = quiz_with_correct(&[0, 0, 0, 0, 0, 0, 0, 0]);
        let result = score(&quiz, &sheet(&[0, 1, 1, 1, 1, 1, 1, 1]));
        assert_eq!(result.percentage, 13);

        // 1/3 = 33.33% -> 33
        let quiz = quiz_with_correct(&[0, 0, 0]);
        let result = score(&quiz, &sheet(&[0, 1, 1]));
        assert_eq!(result.percentage, 33);
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let quiz = quiz_with_correct(&[0, 1, 2]);
        let mut partial = AnswerSheet::new();
        partial.select(0, 0);
        let result = score(&quiz, &partial);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn scoring_is_idempotent() {
        let quiz = quiz_with_correct(&[1, 0, 2, 3]);
        let answers = sheet(&[1, 0, 2, 1]);
        assert_eq!(score(&quiz, &answers), score(&quiz, &answers));
    }

    #[test]
    fn score_stays_within_bounds() {
        let quiz = quiz_with_correct(&[0, 1, 2, 3]);
        for picks in [[0, 0, 0, 0], [0, 1, 2, 3], [3, 2, 1, 0]] {
            let result = score(&quiz, &sheet(&picks));
            assert!(result.score <= result.total);
            assert_eq!(
                usize::from(result.percentage),
                (200 * result.score + result.total) / (2 * result.total)
            );
        }
    }
}
