//! In-memory organizational unit repository adapter.
//!
//! Backs tests and local wiring. Provides last-committer-wins atomicity at
//! aggregate granularity: the internal lock is held only within a single
//! port call, never across them.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{OrganizationalUnitRepository, UnitRepositoryError};
use crate::domain::{DelegateId, OrganizationalUnit, UnitId};

/// Map-backed repository that mints surrogate identifiers at first
/// persistence and stores whole aggregates.
#[derive(Debug, Default)]
pub struct InMemoryOrganizationalUnitRepository {
    store: Mutex<HashMap<UnitId, OrganizationalUnit>>,
    next_unit_id: AtomicI64,
    next_delegate_id: AtomicI64,
}

impl InMemoryOrganizationalUnitRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<UnitId, OrganizationalUnit>>, UnitRepositoryError>
    {
        self.store
            .lock()
            .map_err(|_| UnitRepositoryError::connection("unit store lock poisoned"))
    }

    fn mint_unit_id(&self) -> Result<UnitId, UnitRepositoryError> {
        let raw = self.next_unit_id.fetch_add(1, Ordering::Relaxed) + 1;
        UnitId::new(raw)
            .map_err(|error| UnitRepositoryError::query(format!("unit id minting failed: {error}")))
    }

    fn mint_delegate_id(&self) -> Result<DelegateId, UnitRepositoryError> {
        let raw = self.next_delegate_id.fetch_add(1, Ordering::Relaxed) + 1;
        DelegateId::new(raw).map_err(|error| {
            UnitRepositoryError::query(format!("delegate id minting failed: {error}"))
        })
    }
}

#[async_trait]
impl OrganizationalUnitRepository for InMemoryOrganizationalUnitRepository {
    async fn list(&self) -> Result<Vec<OrganizationalUnit>, UnitRepositoryError> {
        let guard = self.lock()?;
        let mut units: Vec<OrganizationalUnit> = guard.values().cloned().collect();
        units.sort_by_key(OrganizationalUnit::id);
        Ok(units)
    }

    async fn find_by_id(
        &self,
        id: UnitId,
    ) -> Result<Option<OrganizationalUnit>, UnitRepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(&id).cloned())
    }

    async fn save(
        &self,
        mut unit: OrganizationalUnit,
    ) -> Result<OrganizationalUnit, UnitRepositoryError> {
        if unit.id().is_none() {
            unit.claim_id(self.mint_unit_id()?);
        }
        unit.mint_delegate_ids(|| self.mint_delegate_id())?;
        // Enrichment is load-time state; it never reaches storage.
        unit.clear_enrichment();

        let id = unit
            .id()
            .ok_or_else(|| UnitRepositoryError::query("saved unit has no identifier"))?;
        let mut guard = self.lock()?;
        // Whole-aggregate replace: delegates absent from the incoming
        // collection are deleted with it, not detached.
        guard.insert(id, unit.clone());
        tracing::debug!(unit_id = %id, "stored organizational unit");
        Ok(unit)
    }

    async fn delete(&self, id: UnitId) -> Result<bool, UnitRepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DelegateDraft, EmployeeDetails, EmployeeKey, OrganizationalUnitDraft, UnitStatus,
    };

    fn key(raw: &str) -> EmployeeKey {
        EmployeeKey::new(raw).expect("valid key")
    }

    fn draft(delegates: Vec<DelegateDraft>) -> OrganizationalUnitDraft {
        OrganizationalUnitDraft {
            name: "Internal Audit".to_owned(),
            description: None,
            status: UnitStatus::Active,
            owner: key("owner1"),
            approver: key("approve1"),
            delegates,
        }
    }

    fn fresh_unit(delegates: Vec<&str>) -> OrganizationalUnit {
        OrganizationalUnit::from_draft(draft(
            delegates
                .into_iter()
                .map(|employee| DelegateDraft {
                    id: None,
                    employee: key(employee),
                })
                .collect(),
        ))
    }

    #[tokio::test]
    async fn save_mints_identifiers_starting_at_one() {
        let repo = InMemoryOrganizationalUnitRepository::new();
        let saved = repo
            .save(fresh_unit(vec!["jdoe", "asmith"]))
            .await
            .expect("save ok");

        assert_eq!(saved.id().map(UnitId::get), Some(1));
        let delegate_ids: Vec<i64> = saved
            .delegates()
            .iter()
            .map(|d| d.id().expect("minted").get())
            .collect();
        assert_eq!(delegate_ids, vec![1, 2]);
        assert!(saved.delegates().iter().all(|d| d.unit() == saved.id()));
    }

    #[tokio::test]
    async fn resaving_preserves_existing_identifiers() {
        let repo = InMemoryOrganizationalUnitRepository::new();
        let saved = repo.save(fresh_unit(vec!["jdoe"])).await.expect("save ok");
        let resaved = repo.save(saved.clone()).await.expect("resave ok");

        assert_eq!(resaved.id(), saved.id());
        assert_eq!(
            resaved.delegates()[0].id(),
            saved.delegates()[0].id()
        );
    }

    #[tokio::test]
    async fn save_discards_transient_enrichment() {
        let repo = InMemoryOrganizationalUnitRepository::new();
        let mut unit = fresh_unit(vec!["jdoe"]);
        for employee in unit.employees_mut() {
            employee.attach_details(Some(EmployeeDetails {
                full_name: "Jane Doe".to_owned(),
                title: None,
                email: None,
            }));
        }

        let saved = repo.save(unit).await.expect("save ok");
        assert!(saved.approver().details().is_none());

        let reloaded = repo
            .find_by_id(saved.id().expect("identified"))
            .await
            .expect("find ok")
            .expect("present");
        assert!(reloaded.approver().details().is_none());
    }

    #[tokio::test]
    async fn delegates_dropped_from_the_aggregate_are_deleted() {
        let repo = InMemoryOrganizationalUnitRepository::new();
        let mut saved = repo
            .save(fresh_unit(vec!["jdoe", "asmith"]))
            .await
            .expect("save ok");
        let kept = saved.delegates()[0].id();

        saved.reconcile_delegates(vec![DelegateDraft {
            id: kept,
            employee: key("jdoe"),
        }]);
        repo.save(saved.clone()).await.expect("resave ok");

        let reloaded = repo
            .find_by_id(saved.id().expect("identified"))
            .await
            .expect("find ok")
            .expect("present");
        assert_eq!(reloaded.delegates().len(), 1);
        assert_eq!(reloaded.delegates()[0].id(), kept);
    }

    #[tokio::test]
    async fn list_returns_units_ordered_by_identifier() {
        let repo = InMemoryOrganizationalUnitRepository::new();
        repo.save(fresh_unit(Vec::new())).await.expect("save ok");
        repo.save(fresh_unit(Vec::new())).await.expect("save ok");

        let units = repo.list().await.expect("list ok");
        let ids: Vec<i64> = units
            .iter()
            .map(|unit| unit.id().expect("identified").get())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn delete_reports_whether_the_unit_existed() {
        let repo = InMemoryOrganizationalUnitRepository::new();
        let saved = repo.save(fresh_unit(Vec::new())).await.expect("save ok");
        let id = saved.id().expect("identified");

        assert!(repo.delete(id).await.expect("delete ok"));
        assert!(!repo.delete(id).await.expect("second delete ok"));
        assert!(repo.find_by_id(id).await.expect("find ok").is_none());
    }
}
