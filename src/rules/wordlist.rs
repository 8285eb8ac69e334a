// Report every word of the text that appears in a word collection.

use tracing::debug;

use super::words;
use crate::collections::{FrozenHashSet, WordCollection};
use crate::match_result::{MatchResult, MatchResults, ScannerRule, Sensitivity};

/// Matches words found in a dictionary, either as written or lowercased.
///
/// The reported text is the dictionary form that matched, so a lowercase
/// dictionary reports `"cancer"` for `"Cancer"`.
#[derive(Debug, Clone)]
pub struct WordListRule<C = FrozenHashSet> {
    words: C,
    sensitivity: Sensitivity,
}

impl WordListRule<FrozenHashSet> {
    /// Build a rule over an owned frozen set of `words`
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::new(FrozenHashSet::new(words))
    }
}

impl<C: WordCollection> WordListRule<C> {
    pub fn new(words: C) -> Self {
        Self::with_sensitivity(words, Sensitivity::Critical)
    }

    pub fn with_sensitivity(words: C, sensitivity: Sensitivity) -> Self {
        Self { words, sensitivity }
    }

    pub fn words(&self) -> &C {
        &self.words
    }

    pub fn find_matches(&self, text: &str) -> MatchResults {
        let results: MatchResults = words(text)
            .filter_map(|word| {
                let found = if self.words.contains(word.text) {
                    word.text.to_string()
                } else {
                    let lower = word.text.to_lowercase();
                    if !self.words.contains(&lower) {
                        return None;
                    }
                    lower
                };
                Some(MatchResult::new(found, word.start, word.end, self.sensitivity))
            })
            .collect();

        debug!(dictionary = self.words.size(), matches = results.len(), "wordlist scan finished");
        results
    }
}

impl<C: WordCollection + Send + Sync> ScannerRule for WordListRule<C> {
    fn name(&self) -> &'static str {
        "wordlist"
    }

    fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    fn find_matches(&self, text: &str) -> MatchResults {
        WordListRule::find_matches(self, text)
    }
}
