//! Threshold grading over per-criterion evidence strengths.
//!
//! Used whenever the model's own rating is unavailable: stage failures,
//! a final determination without a parseable rating, and the error fallback.

use crate::models::assessment::Rating;
use crate::models::criteria::EvidenceStrength;

/// Strong and Moderate tallies behind a threshold grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrengthTally {
    pub strong: usize,
    pub moderate: usize,
}

impl StrengthTally {
    pub fn from_strengths<I>(strengths: I) -> Self
    where
        I: IntoIterator<Item = EvidenceStrength>,
    {
        strengths
            .into_iter()
            .fold(Self::default(), |mut tally, strength| {
                match strength {
                    EvidenceStrength::Strong => tally.strong += 1,
                    EvidenceStrength::Moderate => tally.moderate += 1,
                    EvidenceStrength::Weak | EvidenceStrength::None => {}
                }
                tally
            })
    }

    /// strong ≥ 3 or strong+moderate ≥ 5 → HIGH; strong+moderate ≥ 3 → MEDIUM; else LOW.
    pub fn rating(self) -> Rating {
        let qualifying = self.strong + self.moderate;
        if self.strong >= 3 || qualifying >= 5 {
            Rating::High
        } else if qualifying >= 3 {
            Rating::Medium
        } else {
            Rating::Low
        }
    }

    /// "Rating based on N strong and M moderate criteria."
    pub fn describe(self) -> String {
        format!(
            "Rating based on {} strong and {} moderate criteria.",
            self.strong, self.moderate
        )
    }
}

/// Grades a set of criterion strengths by the threshold rule.
pub fn grade<I>(strengths: I) -> Rating
where
    I: IntoIterator<Item = EvidenceStrength>,
{
    StrengthTally::from_strengths(strengths).rating()
}
