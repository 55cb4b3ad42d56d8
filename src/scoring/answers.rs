//! Likert answer scoring.

use crate::model::{MAX_SCORE, ScoreMap};
use indexmap::IndexMap;

/// Lowest answer on the default questionnaire scale (strongly disagree).
pub const DEFAULT_LIKERT_MIN: u8 = 1;
/// Highest answer on the default questionnaire scale (strongly agree).
pub const DEFAULT_LIKERT_MAX: u8 = 4;

/// Answer scale used to turn raw answers into 0-100 scores.
///
/// A score is the mean answer divided by the scale maximum, times 100; on
/// the default 1-4 scale each point is worth 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikertScale {
    min: u8,
    max: u8,
}

impl Default for LikertScale {
    fn default() -> Self {
        Self::new(DEFAULT_LIKERT_MIN, DEFAULT_LIKERT_MAX)
    }
}

impl LikertScale {
    /// Create a scale; a degenerate range falls back to the default.
    #[must_use]
    pub fn new(min: u8, max: u8) -> Self {
        if max == 0 || min >= max {
            tracing::warn!(
                "Invalid answer scale {min}-{max}, using {DEFAULT_LIKERT_MIN}-{DEFAULT_LIKERT_MAX}"
            );
            return Self {
                min: DEFAULT_LIKERT_MIN,
                max: DEFAULT_LIKERT_MAX,
            };
        }
        Self { min, max }
    }

    /// Lowest valid answer.
    #[must_use]
    pub const fn min(&self) -> u8 {
        self.min
    }

    /// Highest valid answer.
    #[must_use]
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Whether an answer lies on the scale.
    #[must_use]
    pub fn accepts(&self, answer: f64) -> bool {
        answer.is_finite() && answer >= f64::from(self.min) && answer <= f64::from(self.max)
    }

    /// Score a set of answers, skipping any that are off the scale.
    ///
    /// Returns `None` when no answer is usable.
    #[must_use]
    pub fn score(&self, answers: &[f64]) -> Option<f64> {
        let valid: Vec<f64> = answers
            .iter()
            .copied()
            .filter(|&answer| {
                let ok = self.accepts(answer);
                if !ok {
                    tracing::warn!(
                        "Ignoring answer {answer} outside scale {}-{}",
                        self.min,
                        self.max
                    );
                }
                ok
            })
            .collect();

        if valid.is_empty() {
            return None;
        }

        let mean = valid.iter().sum::<f64>() / valid.len() as f64;
        Some(mean / f64::from(self.max) * MAX_SCORE)
    }
}

/// Score every key's answers; keys without usable answers score 0.
#[must_use]
pub fn score_answers(answers: &IndexMap<String, Vec<f64>>, scale: &LikertScale) -> ScoreMap {
    answers
        .iter()
        .map(|(key, values)| {
            let score = scale.score(values).unwrap_or_else(|| {
                tracing::warn!("No usable answers for '{key}', scoring 0");
                0.0
            });
            (key.clone(), score)
        })
        .collect()
}
