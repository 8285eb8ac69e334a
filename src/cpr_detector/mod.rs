// CPR-number detector: one left-to-right pass, no backtracking, validation
// folded into the automaton. The detector value holds configuration only;
// every scan builds its own automaton, so one detector serves many threads.

use tracing::debug;

use crate::match_result::{MatchResult, MatchResults, ScannerRule, Sensitivity};

pub mod automaton;
pub mod context;
pub mod validation;

pub use automaton::{Automaton, Candidate, State, Step, CPR_DIGITS};

/// Shortest buffer that can hold a CPR number
pub const MIN_INPUT_LEN: usize = CPR_DIGITS;

/// Finds Danish CPR numbers (`DDMMYY-SSSS`) in text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CprDetector {
    check_mod11: bool,
    examine_context: bool,
}

impl CprDetector {
    /// Tier assigned to every CPR match
    pub const SENSITIVITY: Sensitivity = Sensitivity::Critical;

    /// Create a detector.
    ///
    /// * `check_mod11` - also require the weighted digit sum to be divisible by 11
    /// * `examine_context` - require word boundaries around the number and no
    ///   blacklisted label right before it
    pub const fn new(check_mod11: bool, examine_context: bool) -> Self {
        Self {
            check_mod11,
            examine_context,
        }
    }

    pub fn check_mod11(&self) -> bool {
        self.check_mod11
    }

    pub fn examine_context(&self) -> bool {
        self.examine_context
    }

    /// Find every CPR number in `text`, in order of appearance.
    ///
    /// Offsets are character positions; `end` is the last character consumed,
    /// separators included. Matched text holds the ten digits only.
    pub fn find_matches(&self, text: &str) -> MatchResults {
        let mut results = Vec::new();

        // Byte length bounds character length from above.
        if text.len() < MIN_INPUT_LEN {
            return results;
        }

        let mut automaton = Automaton::new();
        let mut chars = text.char_indices().enumerate().peekable();

        while let Some((position, (byte_offset, c))) = chars.next() {
            if let Step::Complete(candidate) = automaton.step(c, position, byte_offset) {
                let following = chars.peek().map(|&(_, (_, next))| next);
                if self.accept(&candidate, text, following) {
                    results.push(MatchResult::new(
                        candidate.text(),
                        candidate.start,
                        candidate.end,
                        Self::SENSITIVITY,
                    ));
                }
            }
        }

        debug!(bytes = text.len(), matches = results.len(), "cpr scan finished");
        results
    }

    /// Checks that need the whole candidate: control number, mod-11, context
    fn accept(&self, candidate: &Candidate, text: &str, following: Option<char>) -> bool {
        // Placeholder numbers like 010101-0000 are not issued.
        if validation::control_number(&candidate.digits) == 0 {
            return false;
        }

        if self.check_mod11 && !validation::passes_mod11(&candidate.digits) {
            return false;
        }

        if self.examine_context {
            let preceding = &text[..candidate.start_byte];
            if !context::is_boundary(preceding.chars().next_back()) || !context::is_boundary(following) {
                return false;
            }
            if context::has_blacklisted_prefix(preceding, context::blacklist()) {
                debug!(start = candidate.start, "cpr candidate suppressed by label");
                return false;
            }
        }

        true
    }
}

impl ScannerRule for CprDetector {
    fn name(&self) -> &'static str {
        "cpr"
    }

    fn sensitivity(&self) -> Sensitivity {
        Self::SENSITIVITY
    }

    fn find_matches(&self, text: &str) -> MatchResults {
        CprDetector::find_matches(self, text)
    }
}
