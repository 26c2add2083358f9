use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;
use serde_json::Value;
use thiserror::Error;

use crate::sales::catalog::Catalog;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} must hold a JSON array of records, found {found}", path.display())]
    NotAnArray { path: PathBuf, found: &'static str },
}

/// Reads a JSON array and returns its elements in file order, undecoded.
pub fn load_records(path: &Path) -> Result<Vec<Value>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_reader(BufReader::new(file)).map_err(|source| DataError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    match document {
        Value::Array(records) => {
            info!("loaded records, path={}, count={}", path.display(), records.len());
            Ok(records)
        },
        other => Err(DataError::NotAnArray {
            path: path.to_path_buf(),
            found: kind_of(&other),
        }),
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog, DataError> {
    let products = load_records(path)?;
    let catalog = Catalog::build(&products);
    info!(
        "catalog indexed, products={}, skipped={}",
        catalog.len(),
        catalog.warnings().len()
    );

    Ok(catalog)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
