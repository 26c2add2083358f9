use std::path::PathBuf;

use clap::Parser;

/// Compute the total cost of a sales record against a price catalog
#[derive(Parser, Debug)]
#[command(name = "compute_sales", long_about = None)]
pub struct Args {
    /// JSON array of products, each with a `title` and a `price`
    #[arg(value_name = "PRICE_CATALOG")]
    pub catalog: PathBuf,

    /// JSON array of sales, each with a `SALE_ID`, a `Product` and a `Quantity`
    #[arg(value_name = "SALES_RECORD")]
    pub sales: PathBuf,

    /// Directory receiving the results and console capture files
    #[arg(long = "results-dir", value_name = "DIR", default_value = "results")]
    pub results_dir: PathBuf,
}
