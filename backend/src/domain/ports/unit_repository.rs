//! Port for organizational unit persistence.
//!
//! The repository owns identifier minting: a unit or delegate saved without
//! an identifier receives one, exactly once, at first persistence. Saves and
//! deletes cascade over the delegate collection per the composition
//! invariant — a delegate absent from the saved aggregate is gone from
//! storage, not detached.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{OrganizationalUnit, UnitId};

/// Persistence errors raised by [`OrganizationalUnitRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitRepositoryError {
    /// Repository connection could not be established.
    #[error("unit repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("unit repository query failed: {message}")]
    Query { message: String },
}

impl UnitRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for the organizational unit aggregate.
///
/// Adapters are responsible for the transactional isolation of the
/// read-reconcile-write sequence; the domain holds no locks across port
/// calls. Last-committer-wins at aggregate granularity is acceptable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationalUnitRepository: Send + Sync {
    /// List every stored unit.
    async fn list(&self) -> Result<Vec<OrganizationalUnit>, UnitRepositoryError>;

    /// Fetch a unit by identifier; `None` when absent.
    async fn find_by_id(
        &self,
        id: UnitId,
    ) -> Result<Option<OrganizationalUnit>, UnitRepositoryError>;

    /// Persist the aggregate and return its stored state.
    ///
    /// Mints unit and delegate identifiers missing at first persistence,
    /// discards transient enrichment, and cascades delegate
    /// inserts/updates/deletes.
    async fn save(
        &self,
        unit: OrganizationalUnit,
    ) -> Result<OrganizationalUnit, UnitRepositoryError>;

    /// Delete a unit and, by composition, all its delegates.
    ///
    /// Returns `Ok(true)` if the unit existed, `Ok(false)` otherwise.
    async fn delete(&self, id: UnitId) -> Result<bool, UnitRepositoryError>;
}
