//! Reqwest-backed employee directory adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into the domain enrichment record.
//! A 404 from the directory is an absent employee, not a failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::EmployeeDetailsDto;
use crate::domain::ports::{EmployeeDirectory, EmployeeDirectoryError};
use crate::domain::{EmployeeDetails, EmployeeKey};

/// Default request timeout for directory lookups.
pub const DEFAULT_DIRECTORY_TIMEOUT: Duration = Duration::from_secs(10);

const EMPLOYEES_PATH: [&str; 3] = ["api", "v1", "employees"];

/// Directory adapter performing HTTP GET requests against one base endpoint.
pub struct HttpEmployeeDirectory {
    client: Client,
    base_url: Url,
}

impl HttpEmployeeDirectory {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_DIRECTORY_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn employee_url(&self, key: &EmployeeKey) -> Result<Url, EmployeeDirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                EmployeeDirectoryError::transport("directory base URL cannot carry path segments")
            })?
            .pop_if_empty()
            .extend(EMPLOYEES_PATH)
            .push(key.as_str());
        Ok(url)
    }
}

#[async_trait]
impl EmployeeDirectory for HttpEmployeeDirectory {
    async fn resolve(
        &self,
        key: &EmployeeKey,
    ) -> Result<Option<EmployeeDetails>, EmployeeDirectoryError> {
        let url = self.employee_url(key)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(key = %key, "employee absent from directory");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(EmployeeDirectoryError::upstream(
                status.as_u16(),
                format!("unexpected directory response for {key}"),
            ));
        }

        let dto: EmployeeDetailsDto = response.json().await.map_err(|error| {
            if error.is_decode() {
                EmployeeDirectoryError::decode(format!("invalid directory payload: {error}"))
            } else {
                map_transport_error(error)
            }
        })?;
        Ok(Some(dto.into_domain()))
    }
}

fn map_transport_error(error: reqwest::Error) -> EmployeeDirectoryError {
    if error.is_timeout() {
        EmployeeDirectoryError::timeout(error.to_string())
    } else {
        EmployeeDirectoryError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(base: &str) -> HttpEmployeeDirectory {
        let url = Url::parse(base).expect("valid base url");
        HttpEmployeeDirectory::new(url).expect("client builds")
    }

    fn key(raw: &str) -> EmployeeKey {
        EmployeeKey::new(raw).expect("valid key")
    }

    #[test]
    fn employee_url_appends_the_resource_path() {
        let directory = adapter("http://directory.invalid:9090");
        let url = directory.employee_url(&key("jdoe")).expect("url builds");
        assert_eq!(
            url.as_str(),
            "http://directory.invalid:9090/api/v1/employees/jdoe"
        );
    }

    #[test]
    fn employee_url_tolerates_trailing_slashes_and_prefixes() {
        let directory = adapter("http://directory.invalid/intra/");
        let url = directory.employee_url(&key("j.doe")).expect("url builds");
        assert_eq!(
            url.as_str(),
            "http://directory.invalid/intra/api/v1/employees/j.doe"
        );
    }
}
