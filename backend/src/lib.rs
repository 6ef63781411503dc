//! Organizational unit registry library modules.
//!
//! The domain module owns the aggregate, the reconciliation protocol, and
//! the driven ports; outbound adapters implement those ports for concrete
//! infrastructure.

pub mod domain;
pub mod outbound;
