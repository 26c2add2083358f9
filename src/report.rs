use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::sales::accumulator::RunResult;
use crate::sales::catalog::Catalog;

pub const RESULTS_FILE: &str = "SalesResults.txt";
pub const CONSOLE_FILE: &str = "ConsoleOutput.txt";

const SEPARATOR: &str = "----------------------------------------";

/// Catalog warnings first, then sales warnings in record order, then the totals.
pub fn render(catalog: &Catalog, result: &RunResult) -> String {
    let mut lines: Vec<String> = catalog.warnings().to_vec();
    lines.extend(result.warnings().iter().cloned());
    lines.push(SEPARATOR.to_string());
    lines.push(format!("TOTAL SALES COST: {:.2}", to_cents(*result.total())));
    lines.push(format!("Elapsed time: {:.6} s", result.elapsed().as_secs_f64()));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Rounds half away from zero. Formatting with `{:.2}` alone truncates.
fn to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Writer that forwards everything to `inner` and keeps a copy of what went through.
pub struct Tee<W: Write> {
    inner: W,
    captured: Vec<u8>,
}

impl<W: Write> Tee<W> {
    pub fn new(inner: W) -> Tee<W> {
        Tee { inner, captured: Vec::new() }
    }

    pub fn captured(&self) -> &[u8] {
        &self.captured
    }
}

impl<W: Write> Write for Tee<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.captured.extend_from_slice(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[derive(Debug, PartialEq)]
pub struct ReportPaths {
    pub results: PathBuf,
    pub console: PathBuf,
}

pub fn emit(text: &str, results_dir: &Path) -> Result<ReportPaths> {
    emit_to(io::stdout().lock(), text, results_dir)
}

/// Prints `text` to `console`, then stores it in the results file and what the console
/// received in the capture file.
pub fn emit_to(console: impl Write, text: &str, results_dir: &Path) -> Result<ReportPaths> {
    let mut tee = Tee::new(console);
    tee.write_all(text.as_bytes())?;
    tee.flush()?;

    fs::create_dir_all(results_dir)
        .with_context(|| format!("failed to create results directory {}", results_dir.display()))?;

    let paths = ReportPaths {
        results: results_dir.join(RESULTS_FILE),
        console: results_dir.join(CONSOLE_FILE),
    };
    fs::write(&paths.results, text).with_context(|| format!("failed to write {}", paths.results.display()))?;
    fs::write(&paths.console, tee.captured())
        .with_context(|| format!("failed to write {}", paths.console.display()))?;

    info!(
        "report written, results={}, console={}",
        paths.results.display(),
        paths.console.display()
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::sales::accumulator::process_with_clock;
    use crate::sales::Clock;

    struct Frozen;

    impl Clock for Frozen {
        fn now(&self) -> Duration {
            Duration::from_millis(1500)
        }
    }

    #[test]
    fn test_render() {
        let catalog = Catalog::build(&[json!({"title": "A", "price": 10}), json!({"title": "C"})]);
        let sales = [
            json!({"SALE_ID": 1, "Product": "A", "Quantity": 2}),
            json!({"SALE_ID": 2, "Product": "A", "Quantity": -1}),
            json!({"SALE_ID": 3, "Product": "B", "Quantity": 1}),
        ];
        let result = process_with_clock(&sales, &catalog, &Frozen);

        let expected = "\
[ERROR] Invalid product entry #2: missing field `price`
[WARN] Negative quantity (return/adjustment) for A: -1
[ERROR] Product not found: B
----------------------------------------
TOTAL SALES COST: 10.00
Elapsed time: 0.000000 s
";
        assert_eq!(render(&catalog, &result), expected);
    }

    #[test]
    fn test_render_empty_run() {
        let result = process_with_clock(&[], &Catalog::default(), &Frozen);

        assert_eq!(
            render(&Catalog::default(), &result),
            format!("{}\nTOTAL SALES COST: 0.00\nElapsed time: 0.000000 s\n", SEPARATOR)
        );
    }

    #[test]
    fn test_render_rounds_total_to_cents() {
        let sales = [json!({"SALE_ID": 1, "Product": "A", "Quantity": 3})];
        let cases = [(3.333, "10.00"), (3.335, "10.01"), (3.331, "9.99")];

        for (price, expected) in cases {
            let catalog = Catalog::build(&[json!({"title": "A", "price": price})]);
            let result = process_with_clock(&sales, &catalog, &Frozen);

            let text = render(&catalog, &result);
            assert!(
                text.contains(&format!("TOTAL SALES COST: {}\n", expected)),
                "price {} rendered as:\n{}",
                price,
                text
            );
        }
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(format!("{:.2}", to_cents(dec!(10.999))), "11.00");
        assert_eq!(format!("{:.2}", to_cents(dec!(0.005))), "0.01");
        assert_eq!(format!("{:.2}", to_cents(dec!(-0.005))), "-0.01");
        assert_eq!(format!("{:.2}", to_cents(dec!(-0.001))), "0.00");
    }

    #[test]
    fn test_emit_writes_both_files() -> Result<()> {
        let dir = TempDir::new()?;
        let results_dir = dir.path().join("results");
        let mut console = Vec::new();

        let paths = emit_to(&mut console, "line one\nline two\n", &results_dir)?;

        assert_eq!(paths.results, results_dir.join(RESULTS_FILE));
        assert_eq!(String::from_utf8(console)?, "line one\nline two\n");
        assert_eq!(fs::read_to_string(&paths.results)?, "line one\nline two\n");
        assert_eq!(fs::read_to_string(&paths.console)?, "line one\nline two\n");

        Ok(())
    }

    #[test]
    fn test_tee_captures_what_was_written() -> Result<()> {
        let mut tee = Tee::new(Vec::new());
        write!(tee, "total {}", 3)?;

        assert_eq!(tee.captured(), b"total 3");

        Ok(())
    }
}
