use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use super::record::Product;

#[derive(Debug, Default)]
pub struct Catalog {
    prices: HashMap<String, Decimal>,
    warnings: Vec<String>,
}

impl Catalog {
    /// Entries are indexed in order, so a repeated title keeps the price of its last entry.
    /// Entries that cannot be decoded are skipped and leave one warning each.
    pub fn build(products: &[Value]) -> Catalog {
        let mut catalog = Catalog::default();

        for (index, raw) in products.iter().enumerate() {
            match Product::decode(raw) {
                Ok(product) => catalog.insert(product),
                Err(err) => {
                    debug!("skipping product entry, position={}, err={}", index + 1, err);
                    catalog
                        .warnings
                        .push(format!("[ERROR] Invalid product entry #{}: {}", index + 1, err));
                },
            }
        }

        catalog
    }

    fn insert(&mut self, product: Product) {
        if let Some(previous) = self.prices.insert(product.title.clone(), product.price) {
            debug!(
                "duplicate catalog title, last entry wins, title={}, previous={}, price={}",
                product.title, previous, product.price
            );
        }
    }

    pub fn price_of(&self, title: &str) -> Option<Decimal> {
        self.prices.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
