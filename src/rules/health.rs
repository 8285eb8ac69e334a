// Health terms: a word-list rule over an embedded lowercase dictionary.

use std::sync::OnceLock;

use super::{embedded_dictionary, WordListRule};
use crate::collections::FrozenHashSet;
use crate::match_result::{MatchResults, ScannerRule, Sensitivity};

static HEALTH_TERMS: OnceLock<FrozenHashSet> = OnceLock::new();

/// Shared health-term dictionary
pub fn health_terms() -> &'static FrozenHashSet {
    embedded_dictionary(&HEALTH_TERMS, include_str!("data/health_terms.txt"))
}

/// Finds health-related terms (diagnoses, treatments, conditions)
#[derive(Debug, Clone)]
pub struct HealthRule {
    rule: WordListRule<&'static FrozenHashSet>,
}

impl Default for HealthRule {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthRule {
    pub fn new() -> Self {
        Self {
            rule: WordListRule::with_sensitivity(health_terms(), Sensitivity::Critical),
        }
    }

    pub fn find_matches(&self, text: &str) -> MatchResults {
        self.rule.find_matches(text)
    }
}

impl ScannerRule for HealthRule {
    fn name(&self) -> &'static str {
        "health"
    }

    fn sensitivity(&self) -> Sensitivity {
        Sensitivity::Critical
    }

    fn find_matches(&self, text: &str) -> MatchResults {
        HealthRule::find_matches(self, text)
    }
}
