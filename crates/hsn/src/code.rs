//! HSN code format rules.
//!
//! An HSN code is 2, 4, 6 or 8 ASCII digits. Each level is a prefix of the
//! next: chapter `01`, heading `0101`, subheading `010121`, tariff item
//! `01012100`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of digits in a code.
pub const MIN_CODE_DIGITS: usize = 2;

/// Maximum number of digits in a code.
pub const MAX_CODE_DIGITS: usize = 8;

static HSN_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[0-9]{2}){1,4}$").unwrap());

/// Level of a code in the HSN hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeLevel {
    /// 2-digit chapter.
    Chapter,
    /// 4-digit heading.
    Heading,
    /// 6-digit subheading.
    Subheading,
    /// 8-digit tariff item.
    TariffItem,
}

impl CodeLevel {
    /// All levels, broadest first.
    pub const ALL: [CodeLevel; 4] = [
        CodeLevel::Chapter,
        CodeLevel::Heading,
        CodeLevel::Subheading,
        CodeLevel::TariffItem,
    ];

    /// Level for a code with the given number of digits.
    pub fn from_digits(digits: usize) -> Option<Self> {
        match digits {
            2 => Some(CodeLevel::Chapter),
            4 => Some(CodeLevel::Heading),
            6 => Some(CodeLevel::Subheading),
            8 => Some(CodeLevel::TariffItem),
            _ => None,
        }
    }

    /// Number of digits a code at this level has.
    pub fn digits(&self) -> usize {
        match self {
            CodeLevel::Chapter => 2,
            CodeLevel::Heading => 4,
            CodeLevel::Subheading => 6,
            CodeLevel::TariffItem => 8,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CodeLevel::Chapter => "Chapter",
            CodeLevel::Heading => "Heading",
            CodeLevel::Subheading => "Subheading",
            CodeLevel::TariffItem => "Tariff item",
        }
    }
}

/// Why a token is not a well-formed HSN code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty code")]
    Empty,
    #[error("HSN code must be numeric")]
    NonNumeric,
    #[error("HSN code too short (minimum 2 digits)")]
    TooShort,
    #[error("HSN code too long (maximum 8 digits)")]
    TooLong,
    #[error("HSN code must have an even number of digits (2, 4, 6 or 8)")]
    OddLength,
}

/// Check that `code` is a well-formed HSN code and return its level.
///
/// The code is taken as-is; callers trim surrounding whitespace first.
pub fn check_format(code: &str) -> Result<CodeLevel, FormatError> {
    if HSN_CODE.is_match(code) {
        // Pattern guarantees an even length between 2 and 8.
        return CodeLevel::from_digits(code.len()).ok_or(FormatError::OddLength);
    }

    if code.is_empty() {
        return Err(FormatError::Empty);
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::NonNumeric);
    }
    if code.len() < MIN_CODE_DIGITS {
        return Err(FormatError::TooShort);
    }
    if code.len() > MAX_CODE_DIGITS {
        return Err(FormatError::TooLong);
    }
    Err(FormatError::OddLength)
}

/// Whether `code` is a well-formed HSN code.
pub fn is_well_formed(code: &str) -> bool {
    HSN_CODE.is_match(code)
}

/// Strict even-length prefixes of `code`, longest first.
///
/// `01012100` yields `010121`, `0101`, `01`. Existence is not checked.
pub fn parent_prefixes(code: &str) -> Vec<&str> {
    if !code.is_ascii() || code.len() <= MIN_CODE_DIGITS {
        return Vec::new();
    }

    // Largest even length strictly shorter than the code.
    let mut len = (code.len() - 1) & !1;
    let mut prefixes = Vec::with_capacity(len / 2);
    while len >= MIN_CODE_DIGITS {
        prefixes.push(&code[..len]);
        len -= 2;
    }
    prefixes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_format_levels() {
        assert_eq!(check_format("01"), Ok(CodeLevel::Chapter));
        assert_eq!(check_format("0101"), Ok(CodeLevel::Heading));
        assert_eq!(check_format("010121"), Ok(CodeLevel::Subheading));
        assert_eq!(check_format("01012100"), Ok(CodeLevel::TariffItem));
    }

    #[test]
    fn test_check_format_errors() {
        assert_eq!(check_format(""), Err(FormatError::Empty));
        assert_eq!(check_format("abc123"), Err(FormatError::NonNumeric));
        assert_eq!(check_format("12 34"), Err(FormatError::NonNumeric));
        assert_eq!(check_format("1"), Err(FormatError::TooShort));
        assert_eq!(check_format("123456789"), Err(FormatError::TooLong));
        assert_eq!(check_format("0101010101"), Err(FormatError::TooLong));
        assert_eq!(check_format("010"), Err(FormatError::OddLength));
        assert_eq!(check_format("0101012"), Err(FormatError::OddLength));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert_eq!(check_format("٠١"), Err(FormatError::NonNumeric));
    }

    #[test]
    fn test_parent_prefixes() {
        assert_eq!(parent_prefixes("01012100"), vec!["010121", "0101", "01"]);
        assert_eq!(parent_prefixes("999999"), vec!["9999", "99"]);
        assert_eq!(parent_prefixes("0101"), vec!["01"]);
        assert!(parent_prefixes("01").is_empty());
        assert!(parent_prefixes("").is_empty());
    }

    #[test]
    fn test_parent_prefixes_odd_length() {
        assert_eq!(parent_prefixes("12345"), vec!["1234", "12"]);
        assert_eq!(parent_prefixes("123"), vec!["12"]);
    }

    #[test]
    fn test_level_digits_round_trip() {
        for level in CodeLevel::ALL {
            assert_eq!(CodeLevel::from_digits(level.digits()), Some(level));
        }
        assert_eq!(CodeLevel::from_digits(3), None);
    }
}
