//! Derived external codes for organizational units.
//!
//! A code is a pure, deterministic, reversible function of the unit's
//! surrogate identifier. It is computed on demand and never independently
//! stored, so code and identifier can never disagree.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ids::UnitId;

/// Prefix carried by every derived unit code.
pub const UNIT_CODE_PREFIX: &str = "OU";
/// Minimum digit width of the identifier portion; wider identifiers are not
/// truncated.
pub const UNIT_CODE_MIN_DIGITS: usize = 5;

/// Errors returned when parsing a unit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitCodeParseError {
    /// Input does not match the `OU` + digits pattern.
    PatternMismatch,
    /// Digits parse to zero, which no stored unit can carry.
    NotPositive,
    /// Digits exceed the representable identifier range.
    Overflow,
}

impl fmt::Display for UnitCodeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatternMismatch => write!(
                f,
                "unit code must be '{UNIT_CODE_PREFIX}' followed by decimal digits",
            ),
            Self::NotPositive => write!(f, "unit code must reference a positive identifier"),
            Self::Overflow => write!(f, "unit code identifier is out of range"),
        }
    }
}

impl std::error::Error for UnitCodeParseError {}

static UNIT_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn unit_code_regex() -> &'static Regex {
    UNIT_CODE_RE.get_or_init(|| {
        let pattern = "^OU([0-9]+)$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("unit code regex failed to compile: {error}"))
    })
}

/// Human-readable external identifier derived from a [`UnitId`].
///
/// # Examples
/// ```
/// use taxonomy_backend::domain::{UnitCode, UnitId};
///
/// let id = UnitId::new(7).expect("positive id");
/// let code = UnitCode::from_id(id);
/// assert_eq!(code.as_str(), "OU00007");
/// assert_eq!(UnitCode::parse(code.as_str()), Ok(id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitCode(String);

impl UnitCode {
    /// Derive the code for an identifier: `OU` + base-10 digits, left-padded
    /// with `'0'` to [`UNIT_CODE_MIN_DIGITS`].
    pub fn from_id(id: UnitId) -> Self {
        Self(format!(
            "{UNIT_CODE_PREFIX}{:0width$}",
            id.get(),
            width = UNIT_CODE_MIN_DIGITS
        ))
    }

    /// Invert the derivation: strip the prefix and leading zeros, parse the
    /// remainder as a positive identifier.
    ///
    /// Rejects anything that is not exactly `OU` + digits — an unrelated
    /// prefix never silently parses.
    pub fn parse(input: &str) -> Result<UnitId, UnitCodeParseError> {
        let captures = unit_code_regex()
            .captures(input)
            .ok_or(UnitCodeParseError::PatternMismatch)?;
        let digits = captures
            .get(1)
            .ok_or(UnitCodeParseError::PatternMismatch)?
            .as_str();
        let raw: i64 = digits.parse().map_err(|_| UnitCodeParseError::Overflow)?;
        UnitId::new(raw).map_err(|_| UnitCodeParseError::NotPositive)
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UnitCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UnitCode> for String {
    fn from(value: UnitCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for UnitCode {
    type Error = UnitCodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        // Re-derive so deserialized codes are always canonical.
        Self::parse(&value).map(Self::from_id)
    }
}
