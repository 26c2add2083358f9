pub mod cli;
pub mod data;
pub mod report;
pub mod sales;
