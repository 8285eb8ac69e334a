// Dictionary-driven rules. They share one tokenizer: words are maximal runs of
// alphanumeric characters, with a '-' kept when it sits between two of them.

pub mod address;
pub mod health;
pub mod name;
pub mod wordlist;

use std::sync::OnceLock;

use crate::collections::FrozenHashSet;

pub use address::AddressRule;
pub use health::HealthRule;
pub use name::NameRule;
pub use wordlist::WordListRule;

/// A word located in scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    /// Character position of the first character
    pub start: usize,
    /// Character position of the last character
    pub end: usize,
    /// Byte range of `text` in the scanned buffer
    pub byte_start: usize,
    pub byte_end: usize,
}

impl Word<'_> {
    /// True when the first character is uppercase
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Iterator over the words of a buffer, in order
pub struct Words<'a> {
    text: &'a str,
    chars: std::iter::Peekable<std::iter::Enumerate<std::str::CharIndices<'a>>>,
}

/// Split `text` into words with character and byte offsets
pub fn words(text: &str) -> Words<'_> {
    Words {
        text,
        chars: text.char_indices().enumerate().peekable(),
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = Word<'a>;

    fn next(&mut self) -> Option<Word<'a>> {
        let (start, byte_start, first) = loop {
            let (position, (byte, c)) = self.chars.next()?;
            if c.is_alphanumeric() {
                break (position, byte, c);
            }
        };

        let mut end = start;
        let mut byte_end = byte_start + first.len_utf8();

        while let Some(&(position, (byte, c))) = self.chars.peek() {
            if c.is_alphanumeric() {
                end = position;
                byte_end = byte + c.len_utf8();
                self.chars.next();
            } else if c == '-' && self.text[byte + 1..].chars().next().is_some_and(char::is_alphanumeric) {
                self.chars.next();
            } else {
                break;
            }
        }

        Some(Word {
            text: &self.text[byte_start..byte_end],
            start,
            end,
            byte_start,
            byte_end,
        })
    }
}

/// Build a process-wide dictionary from an embedded list, one entry per line.
/// Blank lines and lines starting with `#` are skipped.
pub(crate) fn embedded_dictionary(cell: &'static OnceLock<FrozenHashSet>, source: &'static str) -> &'static FrozenHashSet {
    cell.get_or_init(|| FrozenHashSet::new(dictionary_entries(source)))
}

fn dictionary_entries(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
