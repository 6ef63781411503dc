//! Wire-format mapping for the employee directory service.
//!
//! The directory payload carries more than the registry consumes; only the
//! fields below are decoded, everything else is ignored.

use serde::Deserialize;

use crate::domain::EmployeeDetails;

/// Employee payload as returned by the directory service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetailsDto {
    full_name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl EmployeeDetailsDto {
    /// Convert the wire payload into the domain enrichment record.
    pub fn into_domain(self) -> EmployeeDetails {
        EmployeeDetails {
            full_name: self.full_name,
            title: self.title,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_consumed_subset() {
        let json = r#"{
            "fullName": "Jane Doe",
            "title": "Auditor",
            "email": "jdoe@example.com",
            "costCenter": "CC-104",
            "managerId": "mgr01"
        }"#;
        let dto: EmployeeDetailsDto = serde_json::from_str(json).expect("decode");
        let details = dto.into_domain();
        assert_eq!(details.full_name, "Jane Doe");
        assert_eq!(details.title.as_deref(), Some("Auditor"));
        assert_eq!(details.email.as_deref(), Some("jdoe@example.com"));
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let dto: EmployeeDetailsDto =
            serde_json::from_str(r#"{"fullName": "Jane Doe"}"#).expect("decode");
        let details = dto.into_domain();
        assert!(details.title.is_none());
        assert!(details.email.is_none());
    }

    #[test]
    fn missing_full_name_is_a_decode_failure() {
        let result: Result<EmployeeDetailsDto, _> =
            serde_json::from_str(r#"{"title": "Auditor"}"#);
        assert!(result.is_err());
    }
}
