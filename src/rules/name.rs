// Person names: capitalized words found in the first- or last-name
// dictionaries. Names separated by exactly one space are merged, so
// "John Peter Hansen" is reported once.

use std::sync::OnceLock;

use tracing::debug;

use super::{embedded_dictionary, words, Word};
use crate::collections::FrozenHashSet;
use crate::match_result::{MatchResult, MatchResults, ScannerRule, Sensitivity};

static FIRST_NAMES: OnceLock<FrozenHashSet> = OnceLock::new();
static LAST_NAMES: OnceLock<FrozenHashSet> = OnceLock::new();

/// Confidence for a name standing alone
pub const LONE_NAME_PROBABILITY: f64 = 0.5;

/// Uppercase first names, female and male
pub fn first_names() -> &'static FrozenHashSet {
    embedded_dictionary(
        &FIRST_NAMES,
        concat!(
            include_str!("data/female_firstnames.txt"),
            "\n",
            include_str!("data/male_firstnames.txt")
        ),
    )
}

/// Uppercase last names
pub fn last_names() -> &'static FrozenHashSet {
    embedded_dictionary(&LAST_NAMES, include_str!("data/lastnames.txt"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKind {
    First,
    Last,
}

#[derive(Debug)]
struct NamePart<'a> {
    word: Word<'a>,
    kind: NameKind,
}

/// Finds person names.
///
/// A compound name is always reported. A lone first name is reported with
/// reduced probability; a lone last name only when `expansive` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameRule {
    expansive: bool,
}

impl NameRule {
    pub const SENSITIVITY: Sensitivity = Sensitivity::Problem;

    pub const fn new(expansive: bool) -> Self {
        Self { expansive }
    }

    pub fn expansive(&self) -> bool {
        self.expansive
    }

    fn classify<'a>(&self, word: Word<'a>) -> Option<NamePart<'a>> {
        if !word.is_capitalized() {
            return None;
        }
        let upper = word.text.to_uppercase();
        let kind = if first_names().contains(&upper) {
            NameKind::First
        } else if last_names().contains(&upper) {
            NameKind::Last
        } else {
            return None;
        };
        Some(NamePart { word, kind })
    }

    pub fn find_matches(&self, text: &str) -> MatchResults {
        let mut results = Vec::new();
        let mut run: Vec<NamePart> = Vec::new();

        for part in words(text).filter_map(|word| self.classify(word)) {
            let joined = run
                .last()
                .is_some_and(|last| &text[last.word.byte_end..part.word.byte_start] == " ");
            if !joined {
                self.flush(text, &mut run, &mut results);
            }
            run.push(part);
        }
        self.flush(text, &mut run, &mut results);

        debug!(bytes = text.len(), matches = results.len(), "name scan finished");
        results
    }

    fn flush(&self, text: &str, run: &mut Vec<NamePart>, results: &mut MatchResults) {
        let (Some(first), Some(last)) = (run.first(), run.last()) else {
            return;
        };

        let result = if run.len() > 1 {
            Some(MatchResult::new(
                &text[first.word.byte_start..last.word.byte_end],
                first.word.start,
                last.word.end,
                Self::SENSITIVITY,
            ))
        } else if first.kind == NameKind::First || self.expansive {
            Some(MatchResult::with_probability(
                first.word.text,
                first.word.start,
                first.word.end,
                Self::SENSITIVITY,
                LONE_NAME_PROBABILITY,
            ))
        } else {
            None
        };

        results.extend(result);
        run.clear();
    }
}

impl ScannerRule for NameRule {
    fn name(&self) -> &'static str {
        "name"
    }

    fn sensitivity(&self) -> Sensitivity {
        Self::SENSITIVITY
    }

    fn find_matches(&self, text: &str) -> MatchResults {
        NameRule::find_matches(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(results: &MatchResults) -> Vec<&str> {
        results.iter().map(MatchResult::matched).collect()
    }

    #[test]
    fn test_empty_content() {
        assert!(NameRule::default().find_matches("").is_empty());
    }

    #[test]
    fn test_single_name() {
        let results = NameRule::default().find_matches("John");
        assert_eq!(texts(&results), vec!["John"]);
        assert_eq!(results[0].probability(), LONE_NAME_PROBABILITY);
    }

    #[test]
    fn test_double_name_merged() {
        let results = NameRule::default().find_matches("John Peter");
        assert_eq!(texts(&results), vec!["John Peter"]);
        assert_eq!((results[0].start(), results[0].end()), (0, 9));
        assert_eq!(results[0].probability(), 1.0);
    }

    #[test]
    fn test_double_name_then_single_name() {
        let results = NameRule::default().find_matches("John Peter is usually just called John.");
        assert_eq!(texts(&results), vec!["John Peter", "John"]);
        assert_eq!((results[1].start(), results[1].end()), (34, 37));
    }

    #[test]
    fn test_lowercase_words_are_not_names() {
        assert!(NameRule::default().find_matches("john peter").is_empty());
    }

    #[test]
    fn test_lone_last_name_needs_expansive() {
        assert!(NameRule::new(false).find_matches("Ring til Hansen.").is_empty());
        assert_eq!(texts(&NameRule::new(true).find_matches("Ring til Hansen.")), vec!["Hansen"]);
        assert_eq!(
            texts(&NameRule::new(false).find_matches("Mette Hansen ringede.")),
            vec!["Mette Hansen"]
        );
    }

    #[test]
    fn test_two_spaces_break_a_name() {
        let results = NameRule::default().find_matches("Peter  Søren");
        assert_eq!(texts(&results), vec!["Peter", "Søren"]);
    }
}
