use std::time::{Duration, Instant};

use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use thiserror::Error;

pub mod accumulator;
pub mod catalog;
pub mod outcome;
pub mod record;

use outcome::{Charged, Malformed, Outcome, Returned, UnmatchedProduct};


#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),
    #[error("amount overflows for {quantity} x {price}")]
    Overflow { price: Decimal, quantity: i64 },
    #[error("running total overflows when adding {0}")]
    TotalOverflow(Decimal),
}

/// What a single sale record does to the running total, and what it has to say about it.
#[enum_dispatch]
pub trait Contribution {
    /// Signed amount added to the total. Zero for records that were skipped.
    fn amount(&self) -> Decimal;

    fn warning(&self) -> Option<String>;
}

/// Monotonic time source used to measure a run.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
