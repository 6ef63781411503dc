//! Persistence adapters for the organizational unit repository port.

mod memory;

pub use memory::InMemoryOrganizationalUnitRepository;
