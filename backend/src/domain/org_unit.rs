//! Organizational unit aggregate and its delegate entities.
//!
//! The unit is the aggregate root: it owns the delegate collection
//! exclusively (composition), maintains every delegate's back-reference, and
//! implements the reconciliation protocol that merges a caller-supplied
//! desired delegate set into the live one while preserving stable
//! identifiers.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::employee::{Employee, EmployeeKey};
use super::ids::{DelegateId, UnitId};
use super::unit_code::UnitCode;

/// Closed set of lifecycle states for an organizational unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Active,
    Inactive,
    Pending,
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        };
        f.write_str(label)
    }
}

/// Validation errors for a caller-supplied unit draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitDraftValidationError {
    EmptyName,
}

impl fmt::Display for UnitDraftValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "unit name must not be empty"),
        }
    }
}

impl std::error::Error for UnitDraftValidationError {}

/// Desired state for one delegate within a unit update.
///
/// An entry carrying an identifier intends to update the existing delegate
/// with that identifier; an entry without one asks for a fresh delegate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DelegateId>,
    pub employee: EmployeeKey,
}

/// Complete desired state for a unit.
///
/// Scalar fields overwrite on update with no merge semantics; there is no
/// partial-field-omission protocol, so every call supplies the whole state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationalUnitDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: UnitStatus,
    pub owner: EmployeeKey,
    pub approver: EmployeeKey,
    #[serde(default)]
    pub delegates: Vec<DelegateDraft>,
}

impl OrganizationalUnitDraft {
    /// Check draft invariants that must hold before any mutation.
    pub fn validate(&self) -> Result<(), UnitDraftValidationError> {
        if self.name.trim().is_empty() {
            return Err(UnitDraftValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Delegate entity: binds one employee value to exactly one owning unit.
///
/// Delegates are owned exclusively by their unit. The back-reference is
/// maintained by the aggregate alone; nothing outside this module can rebind
/// a delegate to a different unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationalUnitDelegate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<DelegateId>,
    employee: Employee,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<UnitId>,
}

impl OrganizationalUnitDelegate {
    /// Build a fresh delegate awaiting identifier assignment at first
    /// persistence.
    pub fn new(employee: Employee) -> Self {
        Self {
            id: None,
            employee,
            unit: None,
        }
    }

    /// Surrogate identifier, absent until first persistence.
    pub fn id(&self) -> Option<DelegateId> {
        self.id
    }

    /// Employee acting on the unit's behalf.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Back-reference to the owning unit.
    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    /// Assign the identifier minted at first persistence. A stored
    /// identifier is never reassigned; later calls are ignored.
    pub fn claim_id(&mut self, id: DelegateId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    fn bind_to(&mut self, unit: Option<UnitId>) {
        self.unit = unit;
    }
}

/// Organizational unit aggregate root.
///
/// ## Invariants
/// - Every delegate's back-reference points at this unit once the unit is
///   identified; the aggregate rebinds delegates whenever its identifier is
///   claimed.
/// - No two delegates carry the same assigned identifier.
/// - The external code is derived from the identifier on demand and never
///   stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationalUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<UnitId>,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    status: UnitStatus,
    owner: EmployeeKey,
    approver: Employee,
    #[serde(default)]
    delegates: Vec<OrganizationalUnitDelegate>,
}

impl OrganizationalUnit {
    /// Build a fresh aggregate from a caller-supplied draft.
    ///
    /// The identifier is minted at first persistence; delegate entries run
    /// through the same reconciliation as updates, which on an empty
    /// collection mints a fresh delegate per entry.
    pub fn from_draft(draft: OrganizationalUnitDraft) -> Self {
        let mut unit = Self {
            id: None,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            owner: draft.owner,
            approver: Employee::new(draft.approver),
            delegates: Vec::new(),
        };
        unit.reconcile_delegates(draft.delegates);
        unit
    }

    /// Surrogate identifier, absent until first persistence.
    pub fn id(&self) -> Option<UnitId> {
        self.id
    }

    /// Derived external code, available once the unit is identified.
    pub fn code(&self) -> Option<UnitCode> {
        self.id.map(UnitCode::from_id)
    }

    /// Unit name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional free-form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Lifecycle status.
    pub fn status(&self) -> UnitStatus {
        self.status
    }

    /// Key of the employee administratively owning the unit.
    pub fn owner(&self) -> &EmployeeKey {
        &self.owner
    }

    /// The single designated approving employee.
    pub fn approver(&self) -> &Employee {
        &self.approver
    }

    /// Delegates owned by this unit.
    pub fn delegates(&self) -> &[OrganizationalUnitDelegate] {
        &self.delegates
    }

    /// Visit every embedded employee mutably: the approver first, then each
    /// delegate's employee. Used by the load-path enrichment step.
    pub fn employees_mut(&mut self) -> impl Iterator<Item = &mut Employee> + '_ {
        std::iter::once(&mut self.approver)
            .chain(self.delegates.iter_mut().map(|delegate| &mut delegate.employee))
    }

    /// Drop transient enrichment from every embedded employee. Called on the
    /// save path so enrichment is never written to storage.
    pub fn clear_enrichment(&mut self) {
        for employee in self.employees_mut() {
            employee.clear_details();
        }
    }

    /// Overwrite scalar fields and reconcile the delegate collection from a
    /// complete desired state. Last write wins for scalars.
    pub fn apply_update(&mut self, draft: OrganizationalUnitDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.status = draft.status;
        self.owner = draft.owner;
        self.approver = Employee::new(draft.approver);
        self.reconcile_delegates(draft.delegates);
    }

    /// Merge a desired delegate set into the live collection, preserving
    /// identity where possible.
    ///
    /// For each desired entry in order:
    /// 1. An identifier matching a delegate currently owned by this unit
    ///    reuses that delegate, overwriting its employee in place.
    /// 2. Otherwise (no identifier, or one this unit does not own) a fresh
    ///    delegate is minted and bound to the unit.
    ///
    /// Existing delegates not claimed by step 1 fall out of the collection;
    /// composition makes that a permanent delete at persist time.
    ///
    /// Repeated identifiers in the desired set are honoured once:
    /// first-occurrence-wins, later entries claiming the same identifier are
    /// dropped.
    pub fn reconcile_delegates(&mut self, desired: Vec<DelegateDraft>) {
        let mut current = std::mem::take(&mut self.delegates);
        let mut next = Vec::with_capacity(desired.len());
        let mut claimed: HashSet<DelegateId> = HashSet::new();

        for entry in desired {
            match entry.id {
                Some(id) if claimed.contains(&id) => {}
                Some(id) => {
                    claimed.insert(id);
                    if let Some(position) =
                        current.iter().position(|delegate| delegate.id == Some(id))
                    {
                        let mut existing = current.swap_remove(position);
                        existing.employee = Employee::new(entry.employee);
                        next.push(existing);
                    } else {
                        // Identifier not owned by this unit: mint fresh
                        // instead of adopting a foreign delegate.
                        next.push(self.bound_delegate(entry.employee));
                    }
                }
                None => next.push(self.bound_delegate(entry.employee)),
            }
        }

        self.delegates = next;
    }

    fn bound_delegate(&self, key: EmployeeKey) -> OrganizationalUnitDelegate {
        let mut delegate = OrganizationalUnitDelegate::new(Employee::new(key));
        delegate.bind_to(self.id);
        delegate
    }

    /// Claim the surrogate identifier minted at first persistence and rebind
    /// every delegate to it. A stored identifier is never reassigned; later
    /// calls are ignored.
    pub fn claim_id(&mut self, id: UnitId) {
        if self.id.is_some() {
            return;
        }
        self.id = Some(id);
        for delegate in &mut self.delegates {
            delegate.bind_to(self.id);
        }
    }

    /// Assign identifiers to delegates minted during reconciliation, keeping
    /// their back-references bound to this unit.
    ///
    /// Called by persistence adapters at save time; minting is fallible so
    /// adapters can surface identifier-allocation failures.
    pub fn mint_delegate_ids<E>(
        &mut self,
        mut next_id: impl FnMut() -> Result<DelegateId, E>,
    ) -> Result<(), E> {
        for delegate in &mut self.delegates {
            if delegate.id.is_none() {
                delegate.claim_id(next_id()?);
            }
            delegate.bind_to(self.id);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "org_unit_tests.rs"]
mod tests;
