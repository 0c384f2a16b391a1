use thiserror::Error;

/// Validation and lookup failures raised by the domain layer.
///
/// The HTTP boundary maps these onto status codes: `Validation` becomes
/// 422, `NotFound` 404, `Duplicate` 409.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{entity} `{key}` not found")]
    NotFound { entity: &'static str, key: String },
    #[error("{entity} `{key}` already exists")]
    Duplicate { entity: &'static str, key: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound { entity, key: key.into() }
    }

    pub fn duplicate(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate { entity, key: key.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::DomainError;

    #[test]
    fn not_found_names_entity_and_key() {
        let error = DomainError::not_found("product", "42");
        assert_eq!(error.to_string(), "product `42` not found");
    }

    #[test]
    fn duplicate_names_entity_and_key() {
        let error = DomainError::duplicate("student", "ada");
        assert_eq!(error.to_string(), "student `ada` already exists");
    }
}
