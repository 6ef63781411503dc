//! Driven port for the external employee directory.
//!
//! The domain owns the lookup contract so load-path enrichment stays
//! adapter-agnostic. "Not found" is an absent result, never an error; any
//! transport failure is treated by the core exactly like "not found"
//! (fail-soft — enrichment is best-effort and never blocks a load). Retries,
//! if desired, belong to the adapter, not the core.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{EmployeeDetails, EmployeeKey};

/// Errors surfaced while calling the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeDirectoryError {
    /// Network transport failed before receiving a response.
    #[error("employee directory transport failed: {message}")]
    Transport { message: String },
    /// Directory call exceeded the configured timeout.
    #[error("employee directory timeout: {message}")]
    Timeout { message: String },
    /// Directory answered with a non-success status.
    #[error("employee directory returned status {status}: {message}")]
    Upstream { status: u16, message: String },
    /// Directory response could not be decoded.
    #[error("employee directory response decode failed: {message}")]
    Decode { message: String },
}

impl EmployeeDirectoryError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for non-success upstream statuses.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port resolving an employee key to directory enrichment data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Resolve a key to enrichment data; `Ok(None)` when the directory does
    /// not know the key.
    async fn resolve(
        &self,
        key: &EmployeeKey,
    ) -> Result<Option<EmployeeDetails>, EmployeeDirectoryError>;
}

/// Fixture directory that knows nobody. Useful for wiring and tests that do
/// not exercise enrichment.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureEmployeeDirectory;

#[async_trait]
impl EmployeeDirectory for FixtureEmployeeDirectory {
    async fn resolve(
        &self,
        _key: &EmployeeKey,
    ) -> Result<Option<EmployeeDetails>, EmployeeDirectoryError> {
        Ok(None)
    }
}
