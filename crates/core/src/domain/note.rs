use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// A note stored as one JSON file per record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("note title must be non-empty"));
    }
    Ok(())
}
