use anyhow::Result;
use clap::Parser;
use log::info;

use compute_sales::cli::Args;
use compute_sales::sales::accumulator;
use compute_sales::{data, report};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let catalog = data::load_catalog(&args.catalog)?;
    let sales = data::load_records(&args.sales)?;

    let result = accumulator::process(&sales, &catalog);
    info!(
        "sales processed, records={}, warnings={}, total={}",
        sales.len(),
        result.warnings().len(),
        result.total()
    );

    report::emit(&report::render(&catalog, &result), &args.results_dir)?;

    Ok(())
}
