/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub question_number: u32,
    pub answered: usize,
    pub total: u32,
    pub score: u32,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Share of the quiz reached, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.question_number as f32 / self.total as f32;
        ratio.clamp(0.0, 1.0)
    }
}
