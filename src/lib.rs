pub mod collections;
pub mod cpr_detector;
pub mod discovery;
pub mod match_result;
pub mod processing;
pub mod reader;
pub mod rules;
pub mod scanner;

// Re-export main types for convenient access
pub use collections::{FrozenHashSet, HashMap, MutableWordCollection, WordCollection};
pub use cpr_detector::CprDetector;
pub use match_result::{MatchResult, MatchResults, ScannerRule, Sensitivity};
pub use rules::{AddressRule, HealthRule, NameRule, WordListRule};
pub use scanner::{RuleKind, RuleMatch, ScanConfig, Scanner};

// Re-export pipeline types for the binary, benchmarks and integration tests
pub use processing::{process_files, FileReport, FileStats, ProcessingConfig, RunStats};
