// Test fixtures with known documents and the matches expected from them
// WHY: Golden testing requires deterministic input/output pairs for validation

#![allow(dead_code)]

/// A short letter with one CPR number written with separators
pub const LETTER_TEXT: &str = "Kære Mette Hansen\n\nVi har modtaget din ansøgning. Dit CPR-nummer er 010190-1234.\nDu bor på Vestergade 12B.\n";

/// Expected `(rule, text)` pairs for LETTER_TEXT with every rule enabled
pub const LETTER_EXPECTED: &[(&str, &str)] = &[
    ("name", "Mette Hansen"),
    ("cpr", "0101901234"),
    ("address", "Vestergade 12B"),
];

/// An invoice whose ten-digit numbers are labelled as something other than CPR numbers
pub const INVOICE_TEXT: &str = "Faktura\nFaknr: 1111111118\nOrdrenummer 0101901234\nKunde CPR 1111111118\n";

/// A medical note with health terms
pub const HEALTH_TEXT: &str = "Patienten har Diabetes og astma. Ingen tegn på kræft.";

/// Text without anything sensitive
pub const CLEAN_TEXT: &str = "Mødet er flyttet til torsdag klokken 10. Husk kage.";
