//! Employee value embedded in the organizational unit aggregate.
//!
//! An employee has no identity of its own; it is a value held by the unit
//! (approver) or by a delegate, keyed by a short directory login. The
//! enrichment slot is transient: populated from the employee directory on
//! load, cleared on save, and excluded from equality.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum allowed length for an employee key.
pub const EMPLOYEE_KEY_MIN: usize = 3;
/// Maximum allowed length for an employee key.
pub const EMPLOYEE_KEY_MAX: usize = 20;

/// Validation errors returned by [`EmployeeKey`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeKeyValidationError {
    Empty,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for EmployeeKeyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "employee key must not be empty"),
            Self::TooShort { min } => {
                write!(f, "employee key must be at least {min} characters")
            }
            Self::TooLong { max } => {
                write!(f, "employee key must be at most {max} characters")
            }
            Self::InvalidCharacters => write!(
                f,
                "employee key may only contain letters, digits, dots, underscores, or dashes",
            ),
        }
    }
}

impl std::error::Error for EmployeeKeyValidationError {}

static EMPLOYEE_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn employee_key_regex() -> &'static Regex {
    EMPLOYEE_KEY_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed
        // characters. Keys are embedded in directory URLs, so the charset
        // stays URL-safe.
        let pattern = "^[A-Za-z0-9._-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("employee key regex failed to compile: {error}"))
    })
}

/// Directory login uniquely identifying a person in the external directory.
///
/// # Examples
/// ```
/// use taxonomy_backend::domain::EmployeeKey;
///
/// let key = EmployeeKey::new("jdoe").expect("valid key");
/// assert_eq!(key.as_str(), "jdoe");
/// assert!(EmployeeKey::new("jd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeKey(String);

impl EmployeeKey {
    /// Validate and construct an [`EmployeeKey`] from borrowed input.
    pub fn new(key: impl AsRef<str>) -> Result<Self, EmployeeKeyValidationError> {
        Self::from_owned(key.as_ref().to_owned())
    }

    fn from_owned(key: String) -> Result<Self, EmployeeKeyValidationError> {
        if key.is_empty() {
            return Err(EmployeeKeyValidationError::Empty);
        }

        let length = key.chars().count();
        if length < EMPLOYEE_KEY_MIN {
            return Err(EmployeeKeyValidationError::TooShort {
                min: EMPLOYEE_KEY_MIN,
            });
        }
        if length > EMPLOYEE_KEY_MAX {
            return Err(EmployeeKeyValidationError::TooLong {
                max: EMPLOYEE_KEY_MAX,
            });
        }

        if !employee_key_regex().is_match(&key) {
            return Err(EmployeeKeyValidationError::InvalidCharacters);
        }

        Ok(Self(key))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmployeeKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmployeeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmployeeKey> for String {
    fn from(value: EmployeeKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmployeeKey {
    type Error = EmployeeKeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Directory-sourced display data for an employee.
///
/// Non-authoritative and never persisted; the fields here are the subset of
/// the directory payload the registry consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    /// Full display name.
    pub full_name: String,
    /// Job title, when the directory knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Contact email, when the directory knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Employee value: an opaque directory key plus a transient enrichment slot.
///
/// ## Invariants
/// - Equality and hashing consider the key alone; two values with the same
///   key but differently-timed directory lookups compare equal.
/// - The enrichment slot is serialized outward for display but never read
///   back in, so a stored employee is always just its key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    key: EmployeeKey,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    details: Option<EmployeeDetails>,
}

impl Employee {
    /// Build an employee value with an empty enrichment slot.
    pub fn new(key: EmployeeKey) -> Self {
        Self { key, details: None }
    }

    /// Directory key identifying this person.
    pub fn key(&self) -> &EmployeeKey {
        &self.key
    }

    /// Enrichment attached during the current load, if any.
    pub fn details(&self) -> Option<&EmployeeDetails> {
        self.details.as_ref()
    }

    /// Store a directory lookup result in the transient slot.
    ///
    /// Idempotent and side-effect-free on the persisted representation; a
    /// failed lookup passes `None` and the slot simply stays empty.
    pub fn attach_details(&mut self, details: Option<EmployeeDetails>) {
        self.details = details;
    }

    /// Drop any attached enrichment. Called on the save path so enrichment
    /// is never written back to storage.
    pub fn clear_details(&mut self) {
        self.details = None;
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc")]
    #[case("jdoe")]
    #[case("j.doe-42_x")]
    #[case("abcdefghijklmnopqrst")]
    fn key_accepts_valid_input(#[case] raw: &str) {
        let key = EmployeeKey::new(raw).expect("valid key");
        assert_eq!(key.as_str(), raw);
    }

    #[rstest]
    #[case("", EmployeeKeyValidationError::Empty)]
    #[case("jd", EmployeeKeyValidationError::TooShort { min: EMPLOYEE_KEY_MIN })]
    #[case(
        "abcdefghijklmnopqrstu",
        EmployeeKeyValidationError::TooLong { max: EMPLOYEE_KEY_MAX }
    )]
    #[case("j doe", EmployeeKeyValidationError::InvalidCharacters)]
    #[case("jdoe!", EmployeeKeyValidationError::InvalidCharacters)]
    fn key_rejects_invalid_input(#[case] raw: &str, #[case] expected: EmployeeKeyValidationError) {
        let err = EmployeeKey::new(raw).expect_err("invalid key rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn equality_ignores_enrichment() {
        let key = EmployeeKey::new("jdoe").expect("valid key");
        let plain = Employee::new(key.clone());
        let mut enriched = Employee::new(key);
        enriched.attach_details(Some(EmployeeDetails {
            full_name: "Jane Doe".to_owned(),
            title: Some("Auditor".to_owned()),
            email: None,
        }));

        assert_eq!(plain, enriched);
    }

    #[test]
    fn enrichment_is_never_deserialized() {
        let json = r#"{"key":"jdoe","details":{"fullName":"Jane Doe"}}"#;
        let employee: Employee = serde_json::from_str(json).expect("deserialize");
        assert_eq!(employee.key().as_str(), "jdoe");
        assert!(employee.details().is_none());
    }

    #[test]
    fn clear_details_empties_the_slot() {
        let mut employee = Employee::new(EmployeeKey::new("jdoe").expect("valid key"));
        employee.attach_details(Some(EmployeeDetails {
            full_name: "Jane Doe".to_owned(),
            title: None,
            email: None,
        }));
        employee.clear_details();
        assert!(employee.details().is_none());
    }
}
