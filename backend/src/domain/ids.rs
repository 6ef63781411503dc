//! Surrogate identifiers for the organizational unit aggregate.
//!
//! Identifiers are minted by the persistence adapter at first persistence and
//! never reassigned. Both newtypes validate positivity at construction and at
//! the serde boundary so a stored identifier can never be zero or negative.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing identifier newtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdValidationError {
    NotPositive,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "identifier must be a positive integer"),
        }
    }
}

impl std::error::Error for IdValidationError {}

/// Stable surrogate identifier of an organizational unit.
///
/// Source of the derived external code (see [`crate::domain::UnitCode`]).
///
/// # Examples
/// ```
/// use taxonomy_backend::domain::UnitId;
///
/// let id = UnitId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UnitId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UnitId(i64);

impl UnitId {
    /// Validate and construct a [`UnitId`] from a raw integer.
    pub fn new(raw: i64) -> Result<Self, IdValidationError> {
        if raw <= 0 {
            return Err(IdValidationError::NotPositive);
        }
        Ok(Self(raw))
    }

    /// Access the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UnitId> for i64 {
    fn from(value: UnitId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UnitId {
    type Error = IdValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stable surrogate identifier of a delegate entity.
///
/// Assigned once at first persistence; preserved across updates so external
/// references and audit trails keyed on it stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DelegateId(i64);

impl DelegateId {
    /// Validate and construct a [`DelegateId`] from a raw integer.
    pub fn new(raw: i64) -> Result<Self, IdValidationError> {
        if raw <= 0 {
            return Err(IdValidationError::NotPositive);
        }
        Ok(Self(raw))
    }

    /// Access the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DelegateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DelegateId> for i64 {
    fn from(value: DelegateId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for DelegateId {
    type Error = IdValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
