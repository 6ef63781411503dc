//! Employee directory adapters for the enrichment port.

mod dto;
mod http_directory;

pub use http_directory::{DEFAULT_DIRECTORY_TIMEOUT, HttpEmployeeDirectory};
