use std::collections::BTreeMap;

/// Selected options for a quiz attempt, keyed by question index.
///
/// The sheet is sparse while the learner is still working through the quiz
/// and owned by a single run; it is cleared whenever the run resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selected: BTreeMap<usize, usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the selected option for a question, replacing any earlier pick.
    pub fn select(&mut self, question: usize, option: usize) {
        self.selected.insert(question, option);
    }

    /// The selected option for a question, if any.
    #[must_use]
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.selected.get(&question).copied()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether every question index in `0..total` has an answer.
    #[must_use]
    pub fn is_complete(&self, total: usize) -> bool {
        self.first_unanswered(total).is_none()
    }

    /// The lowest question index in `0..total` without an answer.
    #[must_use]
    pub fn first_unanswered(&self, total: usize) -> Option<usize> {
        (0..total).find(|index| !self.selected.contains_key(index))
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_starts_empty() {
        let sheet = AnswerSheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet.answered_count(), 0);
        assert_eq!(sheet.first_unanswered(3), Some(0));
        assert!(!sheet.is_complete(1));
        assert!(sheet.is_complete(0));
    }

    #[test]
    fn select_overwrites_earlier_pick() {
        let mut sheet = AnswerSheet::new();
        sheet.select(0, 2);
        sheet.select(0, 1);
        assert_eq!(sheet.answer(0), Some(1));
        assert_eq!(sheet.answered_count(), 1);
    }

    #[test]
    fn completeness_tracks_holes() {
        let mut sheet = AnswerSheet::new();
        sheet.select(0, 0);
        sheet.select(2, 1);
        assert_eq!(sheet.first_unanswered(3), Some(1));
        assert!(!sheet.is_complete(3));

        sheet.select(1, 3);
        assert!(sheet.is_complete(3));
        assert_eq!(sheet.first_unanswered(3), None);
    }

    #[test]
    fn clear_discards_everything() {
        let mut sheet = AnswerSheet::new();
        sheet.select(0, 0);
        sheet.clear();
        assert!(sheet.is_empty());
    }
}
