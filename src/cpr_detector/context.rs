// Context suppression used when `examine_context` is on: the candidate must
// stand alone as a word, and must not follow a label that marks the number as
// an invoice, order or customer number.

use std::sync::OnceLock;

use crate::collections::{FrozenHashSet, WordCollection};

/// Labels that mark a following ten-digit number as something other than a CPR number
pub const BLACKLIST_WORDS: [&str; 17] = [
    "p-nr",
    "p.nr",
    "p-nummer",
    "pnr",
    "customer no",
    "customer-no",
    "bilagsnummer",
    "order number",
    "ordrenummer",
    "fakturanummer",
    "faknr",
    "fak-nr",
    "tullstatistisk",
    "tullstatistik",
    "test report no",
    "protocol no.",
    "dhk:tx",
];

/// Characters of preceding text inspected for a label
pub const LOOKBACK_CHARS: usize = 64;

/// Longest label, in words
pub const LOOKBACK_WORDS: usize = 3;

/// Process-wide blacklist, built on first use
pub fn blacklist() -> &'static FrozenHashSet {
    static BLACKLIST: OnceLock<FrozenHashSet> = OnceLock::new();
    BLACKLIST.get_or_init(|| FrozenHashSet::new(BLACKLIST_WORDS))
}

/// Buffer edge, space, newline or tab
pub fn is_boundary(c: Option<char>) -> bool {
    matches!(c, None | Some(' ' | '\n' | '\t'))
}

/// The last `LOOKBACK_CHARS` characters of `preceding`, without a leading partial word
fn lookback_window(preceding: &str) -> &str {
    let Some((cut, _)) = preceding.char_indices().rev().nth(LOOKBACK_CHARS - 1) else {
        return preceding;
    };
    if cut == 0 {
        return preceding;
    }

    let window = &preceding[cut..];
    let starts_mid_word = preceding[..cut]
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace());
    if starts_mid_word {
        window
            .find(char::is_whitespace)
            .map_or("", |space| &window[space..])
    } else {
        window
    }
}

/// True when the words right before a candidate form a blacklisted label.
///
/// The last one, two and three words of the window are tried as phrases,
/// lowercased, both as written and with a trailing `:`, `,` or `.` removed.
pub fn has_blacklisted_prefix<C: WordCollection + ?Sized>(preceding: &str, blacklist: &C) -> bool {
    let window = lookback_window(preceding).to_lowercase();
    let words: Vec<&str> = window.split_whitespace().collect();

    (1..=LOOKBACK_WORDS.min(words.len())).any(|count| {
        let phrase = words[words.len() - count..].join(" ");
        let trimmed = phrase.trim_end_matches([':', ',', '.']);
        blacklist.contains(&phrase) || blacklist.contains(trimmed)
    })
}
