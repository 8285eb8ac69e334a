// Per-call automaton for the DDMMYY-SSSS shape.
//
// One state per digit position. The digits acceptable next depend on the digit
// just accepted, so impossible days and months die as soon as they are typed.
// A rejected character resets to `Empty` and is not retried as a new start.

#[cfg(feature = "debug-states")]
use tracing::trace;

use super::validation::{self, DateCheck};

/// Number of digits in a CPR number
pub const CPR_DIGITS: usize = 10;

/// Progress through the expected digits; `Dn` means `n` digits accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Empty,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    Match,
}

impl State {
    fn accepted(self) -> usize {
        match self {
            State::Empty => 0,
            State::D1 => 1,
            State::D2 => 2,
            State::D3 => 3,
            State::D4 => 4,
            State::D5 => 5,
            State::D6 => 6,
            State::D7 => 7,
            State::D8 => 8,
            State::D9 => 9,
            State::Match => 10,
        }
    }

    fn next(self) -> State {
        match self {
            State::Empty => State::D1,
            State::D1 => State::D2,
            State::D2 => State::D3,
            State::D3 => State::D4,
            State::D4 => State::D5,
            State::D5 => State::D6,
            State::D6 => State::D7,
            State::D7 => State::D8,
            State::D8 => State::D9,
            State::D9 | State::Match => State::Match,
        }
    }

    /// Separator characters that may be skipped once while in this state
    pub fn accepts_separator(self, c: char) -> bool {
        match self {
            State::D2 | State::D4 => c == ' ',
            State::D6 => matches!(c, ' ' | '-' | '/'),
            _ => false,
        }
    }

    /// Which digits may follow, given the digit accepted last
    pub fn digit_class(self, previous: u8) -> DigitClass {
        match (self, previous) {
            // day tens
            (State::Empty, _) => DigitClass::Range(0, 3),
            // day units
            (State::D1, 0) => DigitClass::Range(1, 9),
            (State::D1, 1 | 2) => DigitClass::Range(0, 9),
            (State::D1, 3) => DigitClass::Range(0, 1),
            // month tens
            (State::D2, _) => DigitClass::Range(0, 1),
            // month units
            (State::D3, 0) => DigitClass::Range(1, 9),
            (State::D3, 1) => DigitClass::Range(0, 2),
            (State::D1 | State::D3, _) => DigitClass::Nothing,
            (State::Match, _) => DigitClass::Nothing,
            // year and control
            _ => DigitClass::Range(0, 9),
        }
    }
}

/// Set of digit values acceptable at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitClass {
    Range(u8, u8),
    Nothing,
}

impl DigitClass {
    /// Digit value of `c` if it belongs to this class
    pub fn accept(self, c: char) -> Option<u8> {
        let DigitClass::Range(low, high) = self else {
            return None;
        };
        let value = c.to_digit(10)? as u8;
        (low..=high).contains(&value).then_some(value)
    }
}

/// A complete ten-digit run that passed the date checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub digits: [u8; CPR_DIGITS],
    /// Character position of the first digit
    pub start: usize,
    /// Character position of the last digit
    pub end: usize,
    /// Byte offset of the first digit, for slicing the preceding text
    pub start_byte: usize,
}

impl Candidate {
    /// The digits as text, separators already dropped
    pub fn text(&self) -> String {
        self.digits.iter().map(|&d| char::from(b'0' + d)).collect()
    }
}

/// What one input character did to the automaton
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Character ignored in `Empty`
    Idle,
    /// Digit accepted
    Advanced,
    /// Separator skipped
    Separator,
    /// Candidate abandoned
    Reset,
    /// Tenth digit accepted
    Complete(Candidate),
}

/// Scan-local automaton state. Created fresh for every scan.
#[derive(Debug, Clone)]
pub struct Automaton {
    state: State,
    digits: [u8; CPR_DIGITS],
    start: usize,
    start_byte: usize,
    allow_separator: bool,
    leap_day: bool,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    pub fn new() -> Self {
        Self {
            state: State::Empty,
            digits: [0; CPR_DIGITS],
            start: 0,
            start_byte: 0,
            allow_separator: false,
            leap_day: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn reset(&mut self) -> Step {
        let was_empty = self.state == State::Empty;
        self.state = State::Empty;
        self.allow_separator = false;
        self.leap_day = false;
        if was_empty {
            Step::Idle
        } else {
            Step::Reset
        }
    }

    /// Feed the character at character `position` / byte `byte_offset`
    pub fn step(&mut self, c: char, position: usize, byte_offset: usize) -> Step {
        if self.allow_separator && self.state.accepts_separator(c) {
            self.allow_separator = false;
            return Step::Separator;
        }

        let accepted = self.state.accepted();
        let previous = accepted.checked_sub(1).map_or(0, |i| self.digits[i]);
        let Some(digit) = self.state.digit_class(previous).accept(c) else {
            #[cfg(feature = "debug-states")]
            trace!(?c, position, state = ?self.state, "rejected");
            return self.reset();
        };

        if self.state == State::Empty {
            self.start = position;
            self.start_byte = byte_offset;
            self.leap_day = false;
        }
        self.digits[accepted] = digit;
        self.state = self.state.next();
        self.allow_separator = matches!(self.state, State::D2 | State::D4 | State::D6);

        #[cfg(feature = "debug-states")]
        trace!(?c, position, state = ?self.state, "accepted");

        match self.state {
            State::D4 => match validation::check_day_month(
                validation::pair(&self.digits, 0),
                validation::pair(&self.digits, 2),
            ) {
                DateCheck::Valid => Step::Advanced,
                DateCheck::LeapDay => {
                    self.leap_day = true;
                    Step::Advanced
                }
                DateCheck::Invalid => self.reset(),
            },
            State::D6 if self.leap_day && !validation::is_leap_year(validation::pair(&self.digits, 4)) => {
                self.reset()
            }
            State::Match => {
                let candidate = Candidate {
                    digits: self.digits,
                    start: self.start,
                    end: position,
                    start_byte: self.start_byte,
                };
                self.reset();
                Step::Complete(candidate)
            }
            _ => Step::Advanced,
        }
    }
}
