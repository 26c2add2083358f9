use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};

use super::RecordError;

/// Opaque sale identifier, kept only to point at a record in warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleId {
    Given(Value),
    Position(usize),
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Strings are shown without their JSON quotes.
            SaleId::Given(Value::String(id)) => write!(f, "SALE_ID {}", id),
            SaleId::Given(id) => write!(f, "SALE_ID {}", id),
            SaleId::Position(position) => write!(f, "#{}", position),
        }
    }
}

impl SaleId {
    /// `position` is 1-based and only used when the record carries no usable `SALE_ID`.
    pub fn of(raw: &Value, position: usize) -> SaleId {
        match raw.get("SALE_ID") {
            Some(Value::Null) | None => SaleId::Position(position),
            Some(id) => SaleId::Given(id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub sale_id: SaleId,
    pub product: String,
    pub quantity: i64,
}

impl SaleRecord {
    pub fn decode(raw: &Value, position: usize) -> Result<SaleRecord, RecordError> {
        let fields = as_object(raw)?;

        Ok(SaleRecord {
            sale_id: SaleId::of(raw, position),
            product: string_field(fields, "Product")?,
            quantity: integer_field(fields, "Quantity")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub title: String,
    pub price: Decimal,
}

impl Product {
    pub fn decode(raw: &Value) -> Result<Product, RecordError> {
        let fields = as_object(raw)?;

        let title = string_field(fields, "title")?;
        let price = decimal_field(fields, "price")?;
        if price < dec!(0) {
            return Err(RecordError::NegativePrice(price));
        }

        Ok(Product { title, price })
    }
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>, RecordError> {
    raw.as_object().ok_or(RecordError::NotAnObject)
}

fn required<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, RecordError> {
    match fields.get(field) {
        Some(Value::Null) | None => Err(RecordError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn wrong_type(field: &'static str, expected: &'static str, found: &Value) -> RecordError {
    RecordError::WrongType {
        field,
        expected,
        found: found.to_string(),
    }
}

fn string_field(fields: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    let value = required(fields, field)?;
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| wrong_type(field, "a string", value))
}

fn integer_field(fields: &Map<String, Value>, field: &'static str) -> Result<i64, RecordError> {
    let value = required(fields, field)?;
    value.as_i64().ok_or_else(|| wrong_type(field, "an integer", value))
}

fn decimal_field(fields: &Map<String, Value>, field: &'static str) -> Result<Decimal, RecordError> {
    let value = required(fields, field)?;
    let Value::Number(number) = value else {
        return Err(wrong_type(field, "a number", value));
    };

    // Going through the text form keeps `0.1` exact instead of inheriting f64 noise.
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| wrong_type(field, "a decimal in range", value))
}
