// Combine the enabled rules into one scan over a text buffer.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cpr_detector::CprDetector;
use crate::match_result::{MatchResult, ScannerRule};
use crate::rules::{AddressRule, HealthRule, NameRule};

/// Rules selectable from configuration and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Cpr,
    Name,
    Address,
    Health,
}

/// Which rules to run and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub rules: Vec<RuleKind>,
    pub check_mod11: bool,
    pub examine_context: bool,
    pub expansive_names: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rules: vec![RuleKind::Cpr],
            check_mod11: false,
            examine_context: false,
            expansive_names: false,
        }
    }
}

/// A match tagged with the rule that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub rule: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// An ordered set of rules run over the same text
pub struct Scanner {
    rules: Vec<Box<dyn ScannerRule>>,
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Self {
        let mut rules: Vec<Box<dyn ScannerRule>> = Vec::with_capacity(config.rules.len());
        for (index, kind) in config.rules.iter().enumerate() {
            // Each rule runs once, at its first position.
            if config.rules[..index].contains(kind) {
                continue;
            }
            rules.push(match kind {
                RuleKind::Cpr => Box::new(CprDetector::new(config.check_mod11, config.examine_context)),
                RuleKind::Name => Box::new(NameRule::new(config.expansive_names)),
                RuleKind::Address => Box::new(AddressRule::new()),
                RuleKind::Health => Box::new(HealthRule::new()),
            });
        }
        Self { rules }
    }

    /// Run caller-supplied rules in the given order
    pub fn with_rules(rules: Vec<Box<dyn ScannerRule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// All matches of all rules, ordered by start position then rule order
    pub fn scan(&self, text: &str) -> Vec<RuleMatch> {
        let mut matches: Vec<RuleMatch> = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.find_matches(text).into_iter().map(|result| RuleMatch {
                    rule: rule.name().to_string(),
                    result,
                })
            })
            .collect();

        // Stable: equal starts keep rule order.
        matches.sort_by_key(|m| m.result.start());
        debug!(rules = self.rules.len(), matches = matches.len(), "scan finished");
        matches
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}
