use std::collections::BTreeMap;

use crate::domain::product::{Product, ProductId};

/// Read-only product reference data, keyed by product id.
///
/// Built once at startup from the catalog file; lookups only after that.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: products.into_iter().map(|product| (product.id, product)).collect() }
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.get(&product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.products.contains_key(&product_id)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, ProductId};

    use super::Catalog;

    #[test]
    fn finds_products_by_id() {
        let catalog = Catalog::new(vec![Product {
            id: ProductId(7),
            name: "Notebook".to_string(),
            price: Decimal::new(350, 2),
        }]);

        assert!(catalog.contains(ProductId(7)));
        let found = catalog.find(ProductId(7)).map(|product| product.name.as_str());
        assert_eq!(found, Some("Notebook"));
        assert!(catalog.find(ProductId(8)).is_none());
    }

    #[test]
    fn later_entries_win_on_duplicate_ids() {
        let catalog = Catalog::new(vec![
            Product { id: ProductId(1), name: "First".to_string(), price: Decimal::ONE },
            Product { id: ProductId(1), name: "Second".to_string(), price: Decimal::TWO },
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find(ProductId(1)).map(|product| product.name.as_str()), Some("Second"));
    }
}
