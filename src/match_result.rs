// Match values shared by every rule, plus the rule capability itself.
// Offsets are 0-based character positions; `end` is inclusive.

use serde::{Deserialize, Serialize};

/// How serious it is to expose a given match, ordered by weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sensitivity {
    Information,
    Notice,
    Warning,
    Problem,
    Critical,
}

impl Sensitivity {
    /// Numeric weight used by report consumers
    pub fn value(&self) -> u16 {
        match self {
            Self::Information => 0,
            Self::Notice => 250,
            Self::Warning => 500,
            Self::Problem => 750,
            Self::Critical => 1000,
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::Critical
    }
}

/// One detected span in a scanned buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "text")]
    matched: String,
    start: usize,
    end: usize,
    sensitivity: Sensitivity,
    probability: f64,
}

/// Ordered matches returned by a single scan
pub type MatchResults = Vec<MatchResult>;

impl MatchResult {
    /// Create a match with full confidence.
    ///
    /// `end` is the index of the last character covered by the match and is
    /// clamped so that `start <= end` always holds.
    pub fn new(matched: impl Into<String>, start: usize, end: usize, sensitivity: Sensitivity) -> Self {
        Self::with_probability(matched, start, end, sensitivity, 1.0)
    }

    /// Create a match with an explicit confidence, clamped to `[0, 1]`
    pub fn with_probability(
        matched: impl Into<String>,
        start: usize,
        end: usize,
        sensitivity: Sensitivity,
        probability: f64,
    ) -> Self {
        Self {
            matched: matched.into(),
            start,
            end: end.max(start),
            sensitivity,
            probability: probability.clamp(0.0, 1.0),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// The matched text, with any separators the rule strips removed
    pub fn matched(&self) -> &str {
        &self.matched
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// True when `other` begins on the character right after this match ends
    pub fn is_next_to(&self, other: &MatchResult) -> bool {
        other.start.checked_sub(self.end) == Some(1)
    }

    /// True when this match begins on the character right after `other` ends
    pub fn is_after(&self, other: &MatchResult) -> bool {
        other.is_next_to(self)
    }

    /// Character gap between the nearer ends of two matches, in either order.
    /// Overlapping matches have distance 0.
    pub fn distance(&self, other: &MatchResult) -> usize {
        if other.start > self.end {
            other.start - self.end
        } else if self.start > other.end {
            self.start - other.end
        } else {
            0
        }
    }

    /// Build one match covering `self` through `other`, joining the texts with `joiner`
    pub fn merge(&self, other: &MatchResult, joiner: &str) -> MatchResult {
        let (first, second) = if self.start <= other.start { (self, other) } else { (other, self) };
        MatchResult::with_probability(
            format!("{}{}{}", first.matched, joiner, second.matched),
            first.start,
            first.end.max(second.end),
            first.sensitivity.max(second.sensitivity),
            first.probability.min(second.probability),
        )
    }
}

/// A scanner rule: a pure, reentrant function from text to ordered matches
pub trait ScannerRule: Send + Sync {
    /// Short identifier used in reports
    fn name(&self) -> &'static str;

    /// Sensitivity tier the rule assigns to its matches
    fn sensitivity(&self) -> Sensitivity;

    /// Scan `text` and return matches in discovery order
    fn find_matches(&self, text: &str) -> MatchResults;
}
