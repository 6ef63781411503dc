//! Domain model for the organizational unit registry.
//!
//! Purpose: define the strongly typed aggregate, its embedded values, the
//! reconciliation protocol, and the ports the domain drives. Types document
//! their invariants and serde contracts in their own Rustdoc.

pub mod employee;
pub mod error;
pub mod ids;
pub mod org_unit;
pub mod org_unit_service;
pub mod ports;
pub mod unit_code;

pub use self::employee::{
    EMPLOYEE_KEY_MAX, EMPLOYEE_KEY_MIN, Employee, EmployeeDetails, EmployeeKey,
    EmployeeKeyValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{DelegateId, IdValidationError, UnitId};
pub use self::org_unit::{
    DelegateDraft, OrganizationalUnit, OrganizationalUnitDelegate, OrganizationalUnitDraft,
    UnitDraftValidationError, UnitStatus,
};
pub use self::org_unit_service::OrganizationalUnitService;
pub use self::unit_code::{UNIT_CODE_MIN_DIGITS, UNIT_CODE_PREFIX, UnitCode, UnitCodeParseError};
