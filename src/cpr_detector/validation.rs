// Numeric checks applied while a candidate is being read. Digits arrive as
// values 0..=9 from the automaton, so nothing here parses text.

/// Weights for the modulus-11 check, one per digit of DDMMYYSSSS
pub const MOD11_WEIGHTS: [u32; 10] = [4, 3, 2, 7, 6, 5, 4, 3, 2, 1];

/// Outcome of checking a day/month pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Valid,
    /// February 29th: valid only if the year turns out to be a leap year
    LeapDay,
    Invalid,
}

/// Check that `day`/`month` name a real calendar date in some year
pub fn check_day_month(day: u8, month: u8) -> DateCheck {
    if day == 0 || day > 31 || month == 0 || month > 12 {
        return DateCheck::Invalid;
    }

    match (month, day) {
        (2, 29) => DateCheck::LeapDay,
        (2, d) if d > 29 => DateCheck::Invalid,
        (4 | 6 | 9 | 11, d) if d > 30 => DateCheck::Invalid,
        _ => DateCheck::Valid,
    }
}

/// Two-digit year rule: the century is unknown, so `00` counts as a leap year
pub fn is_leap_year(year: u8) -> bool {
    year % 4 == 0
}

/// Two-digit number from digits at `index` and `index + 1`
pub fn pair(digits: &[u8; 10], index: usize) -> u8 {
    digits[index] * 10 + digits[index + 1]
}

/// The four trailing control digits as a number
pub fn control_number(digits: &[u8; 10]) -> u16 {
    digits[6..]
        .iter()
        .fold(0u16, |acc, &d| acc * 10 + u16::from(d))
}

/// Weighted digit sum divisible by 11
pub fn passes_mod11(digits: &[u8; 10]) -> bool {
    let sum: u32 = digits
        .iter()
        .zip(MOD11_WEIGHTS)
        .map(|(&d, weight)| u32::from(d) * weight)
        .sum();
    sum % 11 == 0
}
