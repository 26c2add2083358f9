use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use serde_json::Value;

use super::catalog::Catalog;
use super::record::{SaleId, SaleRecord};
use super::{Contribution, RecordError};

#[enum_dispatch(Contribution)]
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Charged,
    Returned,
    UnmatchedProduct,
    Malformed,
}

#[derive(Debug, PartialEq)]
pub struct Charged {
    pub product: String,
    pub quantity: i64,
    pub amount: Decimal,
}

impl Contribution for Charged {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn warning(&self) -> Option<String> {
        None
    }
}

/// A matched record with a negative quantity. Still counted, so it subtracts from the total.
#[derive(Debug, PartialEq)]
pub struct Returned {
    pub product: String,
    pub quantity: i64,
    pub amount: Decimal,
}

impl Contribution for Returned {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn warning(&self) -> Option<String> {
        Some(format!(
            "[WARN] Negative quantity (return/adjustment) for {}: {}",
            self.product, self.quantity
        ))
    }
}

#[derive(Debug, PartialEq)]
pub struct UnmatchedProduct {
    pub product: String,
}

impl Contribution for UnmatchedProduct {
    fn amount(&self) -> Decimal {
        Decimal::ZERO
    }

    fn warning(&self) -> Option<String> {
        Some(format!("[ERROR] Product not found: {}", self.product))
    }
}

#[derive(Debug, PartialEq)]
pub struct Malformed {
    pub sale_id: SaleId,
    pub error: RecordError,
}

impl Contribution for Malformed {
    fn amount(&self) -> Decimal {
        Decimal::ZERO
    }

    fn warning(&self) -> Option<String> {
        Some(format!("[ERROR] Invalid record: {}: {}", self.sale_id, self.error))
    }
}

/// Classifies one raw sale record against the catalog. `position` is 1-based.
pub fn evaluate(raw: &Value, position: usize, catalog: &Catalog) -> Outcome {
    let record = match SaleRecord::decode(raw, position) {
        Ok(record) => record,
        Err(error) => {
            return Malformed {
                sale_id: SaleId::of(raw, position),
                error,
            }
            .into()
        },
    };

    let Some(price) = catalog.price_of(&record.product) else {
        return UnmatchedProduct { product: record.product }.into();
    };

    let Some(amount) = price.checked_mul(Decimal::from(record.quantity)) else {
        return Malformed {
            sale_id: record.sale_id,
            error: RecordError::Overflow {
                price,
                quantity: record.quantity,
            },
        }
        .into();
    };

    if record.quantity < 0 {
        Returned {
            product: record.product,
            quantity: record.quantity,
            amount,
        }
        .into()
    } else {
        Charged {
            product: record.product,
            quantity: record.quantity,
            amount,
        }
        .into()
    }
}
