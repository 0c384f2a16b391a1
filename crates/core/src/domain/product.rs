use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog reference data. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

impl Product {
    /// Field-range checks applied when the catalog file is loaded.
    /// `Decimal` prices are finite by construction, so only positivity
    /// needs checking here.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.0 == 0 {
            return Err(DomainError::validation("product id must be a positive integer"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {} must have a non-empty name",
                self.id
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "product {} must have a positive price",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Product, ProductId};

    fn product(id: u32, name: &str, price: Decimal) -> Product {
        Product { id: ProductId(id), name: name.to_string(), price }
    }

    #[test]
    fn accepts_well_formed_product() {
        product(1, "Keyboard", Decimal::new(4999, 2)).validate().expect("valid product");
    }

    #[test]
    fn rejects_zero_id() {
        let error = product(0, "Keyboard", Decimal::new(4999, 2))
            .validate()
            .expect_err("zero id should fail");
        assert!(error.to_string().contains("positive integer"));
    }

    #[test]
    fn rejects_blank_name() {
        let error =
            product(1, "  ", Decimal::new(4999, 2)).validate().expect_err("blank name should fail");
        assert!(error.to_string().contains("non-empty name"));
    }

    #[test]
    fn rejects_non_positive_price() {
        let error =
            product(1, "Keyboard", Decimal::ZERO).validate().expect_err("zero price should fail");
        assert!(error.to_string().contains("positive price"));
    }
}
