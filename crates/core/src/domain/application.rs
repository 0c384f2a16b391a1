use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Interviewing,
    Rejected,
    Accepted,
}

/// One tracked job application. Ids are assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: u32,
    pub company: String,
    pub title: String,
    pub status: ApplicationStatus,
    pub date_applied: DateTime<Utc>,
}

/// Validate the caller-supplied fields of a new or updated application.
pub fn validate_fields(company: &str, title: &str) -> Result<(), DomainError> {
    if company.trim().is_empty() {
        return Err(DomainError::validation("company must be non-empty"));
    }
    if title.trim().is_empty() {
        return Err(DomainError::validation("title must be non-empty"));
    }
    Ok(())
}
