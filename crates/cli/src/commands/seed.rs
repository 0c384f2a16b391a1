use rust_decimal::Decimal;
use satchel_core::config::{AppConfig, LoadOptions};
use satchel_core::{Product, ProductId};
use satchel_store::{json_file, StoragePaths};

use crate::commands::CommandResult;

/// The deterministic demo catalog: enough variety to exercise merge,
/// checkout rounding, and multi-line carts.
fn demo_products() -> Vec<Product> {
    [
        (1, "Ballpoint Pen", Decimal::new(150, 2)),
        (2, "Spiral Notebook", Decimal::new(350, 2)),
        (3, "Mechanical Keyboard", Decimal::new(4999, 2)),
        (4, "USB-C Cable", Decimal::new(899, 2)),
        (5, "Desk Lamp", Decimal::new(2475, 2)),
    ]
    .into_iter()
    .map(|(id, name, price)| Product { id: ProductId(id), name: name.to_string(), price })
    .collect()
}

pub fn run(force: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let paths = StoragePaths::new(&config.storage.data_dir);

    if paths.products.exists() && !force {
        return CommandResult::failure(
            "seed",
            "catalog_exists",
            format!(
                "`{}` already exists; pass --force to overwrite it",
                paths.products.display()
            ),
            3,
        );
    }

    let products = demo_products();
    if let Err(error) = json_file::write_json_atomic(&paths.products, &products) {
        return CommandResult::failure("seed", "seed_write", error.to_string(), 4);
    }

    CommandResult::success(
        "seed",
        format!("wrote {} demo products to `{}`", products.len(), paths.products.display()),
    )
}
