//! Organizational unit domain service.
//!
//! Implements the exposed contract (list, get, get-by-code, create, update,
//! delete) over the persistence and directory ports. Validation and code
//! parsing happen before any mutation; directory enrichment happens on every
//! load path and never fails one.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{EmployeeDirectory, OrganizationalUnitRepository, UnitRepositoryError};
use crate::domain::{Error, OrganizationalUnit, OrganizationalUnitDraft, UnitCode, UnitId};

/// Organizational unit service, generic over the driven ports.
#[derive(Clone)]
pub struct OrganizationalUnitService<R, D> {
    units: Arc<R>,
    directory: Arc<D>,
}

impl<R, D> OrganizationalUnitService<R, D> {
    /// Create a new service with the given port implementations.
    pub fn new(units: Arc<R>, directory: Arc<D>) -> Self {
        Self { units, directory }
    }
}

impl<R, D> OrganizationalUnitService<R, D>
where
    R: OrganizationalUnitRepository,
    D: EmployeeDirectory,
{
    /// List every unit, enriched from the directory.
    pub async fn list_units(&self) -> Result<Vec<OrganizationalUnit>, Error> {
        let mut units = self
            .units
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        for unit in &mut units {
            self.enrich(unit).await;
        }
        Ok(units)
    }

    /// Fetch one unit by identifier, enriched from the directory.
    pub async fn get_unit(&self, id: UnitId) -> Result<OrganizationalUnit, Error> {
        let mut unit = self
            .units
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::unit_not_found(id))?;
        self.enrich(&mut unit).await;
        Ok(unit)
    }

    /// Fetch one unit by its derived external code.
    ///
    /// A code that does not match the derivation pattern fails with
    /// `MalformedCode`; a well-formed code referencing no stored unit fails
    /// with `NotFound`, so callers can tell garbage from unknown.
    pub async fn get_unit_by_code(&self, code: &str) -> Result<OrganizationalUnit, Error> {
        let id = UnitCode::parse(code).map_err(|error| {
            Error::malformed_code(error.to_string()).with_details(json!({ "code": code }))
        })?;
        self.get_unit(id).await
    }

    /// Create a unit from a complete desired state.
    pub async fn create_unit(
        &self,
        draft: OrganizationalUnitDraft,
    ) -> Result<OrganizationalUnit, Error> {
        Self::validate_draft(&draft)?;
        let unit = OrganizationalUnit::from_draft(draft);
        self.units
            .save(unit)
            .await
            .map_err(Self::map_repository_error)
    }

    /// Update a unit from a complete desired state.
    ///
    /// Scalar fields are overwritten; the delegate collection is reconciled
    /// against the desired set, preserving identifiers where the desired
    /// entries reference delegates this unit owns. Aborts with no mutation
    /// when validation fails or the unit does not exist.
    pub async fn update_unit(
        &self,
        id: UnitId,
        draft: OrganizationalUnitDraft,
    ) -> Result<OrganizationalUnit, Error> {
        Self::validate_draft(&draft)?;
        let mut unit = self
            .units
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::unit_not_found(id))?;
        unit.apply_update(draft);
        self.units
            .save(unit)
            .await
            .map_err(Self::map_repository_error)
    }

    /// Delete a unit and, by composition, all its delegates.
    pub async fn delete_unit(&self, id: UnitId) -> Result<(), Error> {
        let deleted = self
            .units
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Self::unit_not_found(id))
        }
    }

    /// Best-effort enrichment of every embedded employee.
    ///
    /// Directory failures are logged and mapped to an empty slot; a load
    /// never fails because the directory is down.
    async fn enrich(&self, unit: &mut OrganizationalUnit) {
        for employee in unit.employees_mut() {
            let details = match self.directory.resolve(employee.key()).await {
                Ok(details) => details,
                Err(error) => {
                    tracing::warn!(
                        key = %employee.key(),
                        %error,
                        "employee directory lookup failed; continuing without enrichment"
                    );
                    None
                }
            };
            employee.attach_details(details);
        }
    }

    fn validate_draft(draft: &OrganizationalUnitDraft) -> Result<(), Error> {
        draft
            .validate()
            .map_err(|error| Error::invalid_request(error.to_string()))
    }

    fn unit_not_found(id: UnitId) -> Error {
        Error::not_found("organizational unit not found")
            .with_details(json!({ "unitId": id.get() }))
    }

    fn map_repository_error(error: UnitRepositoryError) -> Error {
        match error {
            UnitRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("unit repository unavailable: {message}"))
            }
            UnitRepositoryError::Query { message } => {
                Error::internal(format!("unit repository error: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "org_unit_service_tests.rs"]
mod tests;
