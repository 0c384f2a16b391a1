use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub email: String,
}

pub fn validate_fields(name: &str, email: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("contact name must be non-empty"));
    }
    validate_email(email)
}

/// Shape check only: one `@`, a non-empty local part, and a domain with a
/// dot. Deliverability is out of scope.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => {
            return Err(DomainError::validation(format!("`{email}` is not a valid email address")))
        }
    };

    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.is_empty();
    if local.is_empty() || !domain_ok {
        return Err(DomainError::validation(format!("`{email}` is not a valid email address")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_email, validate_fields};

    #[test]
    fn accepts_plausible_addresses() {
        for email in ["ada@example.com", "a.b+c@mail.example.org"] {
            validate_email(email).unwrap_or_else(|_| panic!("{email} should validate"));
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "ada", "@example.com", "ada@", "ada@nodot", "a@b@c.com", "ada@.com"] {
            assert!(validate_email(email).is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn rejects_blank_name() {
        assert!(validate_fields(" ", "ada@example.com").is_err());
    }
}
