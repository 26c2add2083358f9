use std::time::Duration;

use getset::Getters;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use super::catalog::Catalog;
use super::outcome::{evaluate, Malformed, Outcome};
use super::record::SaleId;
use super::{Clock, Contribution, RecordError, SystemClock};

#[derive(Debug, Default, Getters)]
#[getset(get = "pub")]
pub struct RunResult {
    total: Decimal,
    warnings: Vec<String>,
    elapsed: Duration,
}

impl RunResult {
    fn record(&mut self, total: Decimal, outcome: &Outcome) {
        self.total = total;
        if let Some(warning) = outcome.warning() {
            self.warnings.push(warning);
        }
    }
}

pub fn process(sales: &[Value], catalog: &Catalog) -> RunResult {
    process_with_clock(sales, catalog, &SystemClock::new())
}

/// Folds every sale record, in order, into a single result. No record can stop the run;
/// problems end up as warnings instead.
pub fn process_with_clock(sales: &[Value], catalog: &Catalog, clock: &impl Clock) -> RunResult {
    let started = clock.now();
    let mut result = RunResult::default();

    for (index, raw) in sales.iter().enumerate() {
        let position = index + 1;
        let mut outcome = evaluate(raw, position, catalog);

        let total = match result.total.checked_add(outcome.amount()) {
            Some(total) => total,
            None => {
                outcome = Malformed {
                    sale_id: SaleId::of(raw, position),
                    error: RecordError::TotalOverflow(outcome.amount()),
                }
                .into();
                result.total
            },
        };

        if !matches!(outcome, Outcome::Charged(_)) {
            debug!("sale record flagged, position={}, outcome={:?}", position, outcome);
        }

        result.record(total, &outcome);
    }

    result.elapsed = clock.now().saturating_sub(started);

    result
}
