// Street addresses: a known street name, one space, then a house number.
// Street names may span several words ("Aabenraa Landevej"); the longest
// known name that is followed by a valid house number wins.

use std::sync::OnceLock;

use tracing::debug;

use super::{embedded_dictionary, words, Word};
use crate::collections::FrozenHashSet;
use crate::match_result::{MatchResult, MatchResults, ScannerRule, Sensitivity};

static STREET_NAMES: OnceLock<FrozenHashSet> = OnceLock::new();

/// Most words a street name may span
pub const MAX_STREET_WORDS: usize = 4;

/// Street names, case as written
pub fn street_names() -> &'static FrozenHashSet {
    embedded_dictionary(&STREET_NAMES, include_str!("data/da_addresses.txt"))
}

/// House number: a non-zero digit, up to three more digits, optional letter
pub fn is_house_number(word: &str) -> bool {
    let mut chars = word.chars().peekable();
    if !chars.next().is_some_and(|c| matches!(c, '1'..='9')) {
        return false;
    }

    let mut digits = 1;
    while chars.next_if(char::is_ascii_digit).is_some() {
        digits += 1;
    }
    if digits > 4 {
        return false;
    }

    chars.next_if(char::is_ascii_alphabetic);
    chars.next().is_none()
}

/// Finds street addresses with a house number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressRule;

impl AddressRule {
    pub const SENSITIVITY: Sensitivity = Sensitivity::Problem;

    pub const fn new() -> Self {
        Self
    }

    pub fn find_matches(&self, text: &str) -> MatchResults {
        let tokens: Vec<Word> = words(text).collect();
        let mut results = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            match self.address_at(text, &tokens, i) {
                Some((result, number_index)) => {
                    results.push(result);
                    i = number_index + 1;
                }
                None => i += 1,
            }
        }

        debug!(bytes = text.len(), matches = results.len(), "address scan finished");
        results
    }

    /// Longest address starting at token `i`, with the index of its house number token
    fn address_at(&self, text: &str, tokens: &[Word], i: usize) -> Option<(MatchResult, usize)> {
        let first = tokens[i];
        if !first.is_capitalized() {
            return None;
        }

        // Last token index of each candidate street name, longest first.
        let mut last = i;
        while last + 1 < tokens.len()
            && last + 1 - i < MAX_STREET_WORDS
            && &text[tokens[last].byte_end..tokens[last + 1].byte_start] == " "
        {
            last += 1;
        }

        (i..=last).rev().find_map(|street_end| {
            let street = &text[first.byte_start..tokens[street_end].byte_end];
            let number = tokens.get(street_end + 1)?;
            let gap = &text[tokens[street_end].byte_end..number.byte_start];
            if gap != " " || !is_house_number(number.text) || !street_names().contains(street) {
                return None;
            }
            let result = MatchResult::new(
                &text[first.byte_start..number.byte_end],
                first.start,
                number.end,
                Self::SENSITIVITY,
            );
            Some((result, street_end + 1))
        })
    }
}

impl ScannerRule for AddressRule {
    fn name(&self) -> &'static str {
        "address"
    }

    fn sensitivity(&self) -> Sensitivity {
        Self::SENSITIVITY
    }

    fn find_matches(&self, text: &str) -> MatchResults {
        AddressRule::find_matches(self, text)
    }
}
