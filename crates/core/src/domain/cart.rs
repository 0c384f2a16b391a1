use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::product::ProductId;

/// One product's accumulated quantity in the active cart.
///
/// Name and price are denormalized from the catalog at the time of the
/// add; `last_updated` is refreshed on every quantity merge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub name: String,
    pub price: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// A priced line as it appeared at checkout time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub total: Decimal,
    pub items: Vec<LineSnapshot>,
}

/// Price every line whose product still exists in the catalog.
///
/// Lines referencing products that have since left the catalog are not an
/// error; they are returned separately so the caller can log and skip them.
/// Subtotals and the grand total are rounded to 2 decimal places.
pub fn price_lines<'a>(
    lines: impl Iterator<Item = &'a CartLine>,
    catalog: &Catalog,
) -> (CheckoutSummary, Vec<ProductId>) {
    let mut total = Decimal::ZERO;
    let mut items = Vec::new();
    let mut stale = Vec::new();

    for line in lines {
        if !catalog.contains(line.product_id) {
            stale.push(line.product_id);
            continue;
        }

        let subtotal = line.price * Decimal::from(line.quantity);
        total += subtotal;
        items.push(LineSnapshot {
            product_id: line.product_id,
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            subtotal: subtotal.round_dp(2),
        });
    }

    (CheckoutSummary { total: total.round_dp(2), items }, stale)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::catalog::Catalog;
    use crate::domain::product::{Product, ProductId};

    use super::{price_lines, CartLine};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product { id: ProductId(1), name: "Pen".to_string(), price: Decimal::new(150, 2) },
            Product { id: ProductId(2), name: "Pad".to_string(), price: Decimal::new(333, 2) },
        ])
    }

    fn line(id: u32, name: &str, price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId(id),
            quantity,
            name: name.to_string(),
            price,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn totals_price_times_quantity_rounded_to_cents() {
        let lines =
            vec![line(1, "Pen", Decimal::new(150, 2), 3), line(2, "Pad", Decimal::new(333, 2), 3)];

        let (summary, stale) = price_lines(lines.iter(), &catalog());

        assert!(stale.is_empty());
        assert_eq!(summary.total, Decimal::new(1449, 2));
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.items[0].subtotal, Decimal::new(450, 2));
        assert_eq!(summary.items[1].subtotal, Decimal::new(999, 2));
    }

    #[test]
    fn skips_lines_whose_product_left_the_catalog() {
        let lines =
            vec![line(1, "Pen", Decimal::new(150, 2), 1), line(9, "Gone", Decimal::new(100, 2), 5)];

        let (summary, stale) = price_lines(lines.iter(), &catalog());

        assert_eq!(stale, vec![ProductId(9)]);
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.total, Decimal::new(150, 2));
    }

    #[test]
    fn empty_cart_prices_to_zero() {
        let (summary, stale) = price_lines(std::iter::empty(), &catalog());

        assert!(stale.is_empty());
        assert!(summary.items.is_empty());
        assert_eq!(summary.total, Decimal::ZERO);
    }
}
