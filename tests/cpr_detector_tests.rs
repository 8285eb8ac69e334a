// CPR detector behaviour through the public API
// WHY: One shared detector mirrors how the scanner reuses a single instance

use dsrules::{CprDetector, MatchResult, MatchResults, ScannerRule, Sensitivity};
use std::sync::OnceLock;

static SHARED: OnceLock<CprDetector> = OnceLock::new();
static SHARED_MOD11: OnceLock<CprDetector> = OnceLock::new();

fn detector() -> &'static CprDetector {
    SHARED.get_or_init(CprDetector::default)
}

fn mod11_detector() -> &'static CprDetector {
    SHARED_MOD11.get_or_init(|| CprDetector::new(true, false))
}

fn spans(results: &MatchResults) -> Vec<(&str, usize, usize)> {
    results.iter().map(|m| (m.matched(), m.start(), m.end())).collect()
}

#[test]
fn test_short_inputs_yield_nothing() {
    for input in ["", "1", "111111111", "11 11 11", "abcdefghi"] {
        assert!(detector().find_matches(input).is_empty(), "input {input:?}");
    }
}

#[test]
fn test_plain_number() {
    assert_eq!(spans(&detector().find_matches("1111111118")), vec![("1111111118", 0, 9)]);
}

#[test]
fn test_single_spaces_between_groups() {
    assert_eq!(spans(&detector().find_matches("11 11 11 1118")), vec![("1111111118", 0, 12)]);
}

#[test]
fn test_dash_and_slash_after_year() {
    assert_eq!(spans(&detector().find_matches("111111-1118")), vec![("1111111118", 0, 10)]);
    assert_eq!(spans(&detector().find_matches("111111/1118")), vec![("1111111118", 0, 10)]);
}

#[test]
fn test_double_space_rejected() {
    assert!(detector().find_matches("111111  1118").is_empty());
}

#[test]
fn test_leap_day() {
    assert_eq!(detector().find_matches("2902081111").len(), 1);
    assert!(detector().find_matches("2902111111").is_empty());
    assert_eq!(detector().find_matches("2902001111").len(), 1);
}

#[test]
fn test_impossible_dates() {
    for input in ["3002111111", "3104111111", "3106111111", "3109111111", "3111111111", "0001111111", "0100111111", "3201111111", "0113111111"] {
        assert!(detector().find_matches(input).is_empty(), "input {input}");
    }
    assert_eq!(detector().find_matches("3112991111").len(), 1);
}

#[test]
fn test_zero_control_number() {
    assert!(detector().find_matches("1111110000").is_empty());
}

#[test]
fn test_mod11() {
    assert_eq!(mod11_detector().find_matches("1111111118").len(), 1);
    assert!(mod11_detector().find_matches("1111111111").is_empty());
    assert_eq!(detector().find_matches("1111111111").len(), 1);
}

#[test]
fn test_two_numbers_in_order() {
    let results = detector().find_matches("1111111118 2304516782");
    assert_eq!(
        spans(&results),
        vec![("1111111118", 0, 9), ("2304516782", 11, 20)]
    );
    assert!(results[0].end() < results[1].start());
}

#[test]
fn test_longer_digit_runs() {
    // Eleven digits: the first ten complete a match, the trailing digit starts nothing.
    assert_eq!(spans(&detector().find_matches("11111111181")), vec![("1111111118", 0, 9)]);
    // A match ends the candidate; the next one starts fresh.
    assert_eq!(detector().find_matches("11111111181111111118").len(), 2);
}

#[test]
fn test_failed_candidate_restarts_after_failure_point() {
    // '4' after '3' is rejected and dropped, the number starting after it is found.
    let results = detector().find_matches("341111111118");
    assert_eq!(spans(&results), vec![("1111111118", 2, 11)]);
}

#[test]
fn test_context_suppression() {
    let strict = CprDetector::new(false, true);
    assert!(strict.find_matches("This is a fak-nr 1111111118").is_empty());
    assert!(strict.find_matches("#1111111118").is_empty());
    assert!(strict.find_matches("1111111118#").is_empty());
    assert!(strict.find_matches("ref1111111118").is_empty());
    assert_eq!(strict.find_matches("CPR 1111111118\n").len(), 1);
    assert_eq!(strict.find_matches("1111111118").len(), 1);
}

#[test]
fn test_context_labels_case_insensitive() {
    let strict = CprDetector::new(false, true);
    assert!(strict.find_matches("P-NR 1111111118").is_empty());
    assert!(strict.find_matches("Customer No 1111111118").is_empty());
    assert!(strict.find_matches("Bilagsnummer: 1111111118").is_empty());
    assert_eq!(strict.find_matches("Customer 1111111118").len(), 1);
}

#[test]
fn test_match_metadata() {
    let results = detector().find_matches("x 1111111118");
    let found: &MatchResult = &results[0];
    assert_eq!(found.sensitivity(), Sensitivity::Critical);
    assert_eq!(found.probability(), 1.0);
    assert!(found.start() <= found.end());
}

#[test]
fn test_idempotent() {
    let text = "CPR 010190-1234, 11 11 11 1118 og 2304516782 samt 3002111111.";
    let first = detector().find_matches(text);
    let second = detector().find_matches(text);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_concurrent_calls_on_one_detector() {
    let text = "1111111118 ".repeat(200);
    let expected = detector().find_matches(&text);
    assert_eq!(expected.len(), 200);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| detector().find_matches(&text)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_as_boxed_scanner_rule() {
    let rule: Box<dyn ScannerRule> = Box::new(CprDetector::new(true, true));
    assert_eq!(rule.name(), "cpr");
    assert_eq!(rule.sensitivity(), Sensitivity::Critical);
    assert_eq!(rule.find_matches("pnr 1111111118 og 1111111118").len(), 1);
}
