//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the persistence store and the employee directory). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants.

mod employee_directory;
mod unit_repository;

#[cfg(test)]
pub use employee_directory::MockEmployeeDirectory;
pub use employee_directory::{EmployeeDirectory, EmployeeDirectoryError, FixtureEmployeeDirectory};
#[cfg(test)]
pub use unit_repository::MockOrganizationalUnitRepository;
pub use unit_repository::{OrganizationalUnitRepository, UnitRepositoryError};
