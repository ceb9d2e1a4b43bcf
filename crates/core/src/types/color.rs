//! Hex color value type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    /// The input string is empty.
    #[error("color value cannot be empty")]
    Empty,
    /// The input does not start with `#`.
    #[error("color value must start with '#'")]
    MissingHash,
    /// The digits after `#` are not a 3, 4, 6 or 8 digit hex code.
    #[error("color value must be '#' followed by 3, 4, 6 or 8 hex digits")]
    InvalidDigits,
}

/// A color value such as `#1a2b3c`.
///
/// ## Examples
///
/// ```
/// use backoffice_core::HexColor;
///
/// assert!(HexColor::parse("#fff").is_ok());
/// assert!(HexColor::parse("#00FF0080").is_ok());
/// assert!(HexColor::parse("fff").is_err());
/// assert!(HexColor::parse("#ggg").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `HexColor` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, lacks the leading `#`, or the
    /// remainder is not 3, 4, 6 or 8 hex digits.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HexColorError::Empty);
        }

        let digits = s.strip_prefix('#').ok_or(HexColorError::MissingHash)?;

        if !matches!(digits.len(), 3 | 4 | 6 | 8)
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(HexColorError::InvalidDigits);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the color value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `HexColor` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        for value in ["#fff", "#FFFF", "#1a2b3c", "#1A2B3C4D", "  #abc  "] {
            assert!(HexColor::parse(value).is_ok(), "{value}");
        }
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(HexColor::parse(""), Err(HexColorError::Empty));
        assert_eq!(HexColor::parse("   "), Err(HexColorError::Empty));
    }

    #[test]
    fn test_parse_missing_hash() {
        assert_eq!(HexColor::parse("ffffff"), Err(HexColorError::MissingHash));
        assert_eq!(HexColor::parse("red"), Err(HexColorError::MissingHash));
    }

    #[test]
    fn test_parse_invalid_digits() {
        for value in ["#", "#ff", "#fffff", "#ggg", "#12345678a"] {
            assert_eq!(
                HexColor::parse(value),
                Err(HexColorError::InvalidDigits),
                "{value}"
            );
        }
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(HexColor::parse(" #abc ").map(HexColor::into_inner), Ok("#abc".to_owned()));
    }
}
