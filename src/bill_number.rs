//! Canonical bill numbers shared by both data sources.
//!
//! LegiScan reports `A00123` while the senate API reports `A123` or `S4567A`
//! (with an amendment letter). Every join goes through [`standardize`].

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Width of the zero-padded numeric part
pub const DIGIT_WIDTH: usize = 5;

fn bill_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z])([0-9]+)[A-Za-z]?$").expect("bill number pattern is valid")
    })
}

/// A standardized bill number: uppercase chamber letter followed by at least
/// five digits, e.g. `A00123`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillNumber(String);

impl BillNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Chamber letter (always uppercase)
    pub fn prefix(&self) -> char {
        // Construction guarantees a leading ASCII letter
        self.0.chars().next().unwrap_or('?')
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BillNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Standardize a raw bill number.
///
/// Uppercases the chamber letter, strips a trailing amendment letter and
/// left-pads the digits with zeros to [`DIGIT_WIDTH`]. Numbers that already
/// have five or more digits keep their digits unchanged.
pub fn standardize(raw: &str) -> Result<BillNumber> {
    let trimmed = raw.trim();
    let caps = bill_number_regex()
        .captures(trimmed)
        .ok_or_else(|| Error::MalformedIdentifier(raw.to_string()))?;

    let letter = caps[1].to_ascii_uppercase();
    let digits = &caps[2];

    Ok(BillNumber(format!(
        "{}{:0>width$}",
        letter,
        digits,
        width = DIGIT_WIDTH
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_short_numbers() {
        assert_eq!(standardize("A123").unwrap().as_str(), "A00123");
        assert_eq!(standardize("s7").unwrap().as_str(), "S00007");
    }

    #[test]
    fn test_strips_amendment_suffix() {
        assert_eq!(standardize("S4567A").unwrap().as_str(), "S04567");
        assert_eq!(standardize("a1b").unwrap().as_str(), "A00001");
    }

    #[test]
    fn test_full_width_unchanged() {
        assert_eq!(standardize("A12345").unwrap().as_str(), "A12345");
        assert_eq!(standardize("S123456").unwrap().as_str(), "S123456");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["A1", "S4567A", "a00099", "S12345", "J100", "K99999Z"] {
            let once = standardize(raw).unwrap();
            let twice = standardize(once.as_str()).unwrap();
            assert_eq!(once, twice, "not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_malformed() {
        for raw in ["", "A", "1234", "AB12", "A12BC", "chap.123", "A-12"] {
            assert!(
                matches!(standardize(raw), Err(Error::MalformedIdentifier(_))),
                "expected malformed for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_prefix() {
        assert_eq!(standardize("s12").unwrap().prefix(), 'S');
    }
}
