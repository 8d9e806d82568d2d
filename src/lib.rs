pub mod client;
pub mod config;
pub mod error;
pub mod query_data;
pub mod query_job;
pub mod row;
pub mod service;
pub mod structs;

#[cfg(test)]
mod fixtures;

pub use client::Client;
pub use config::{ClientConfig, Credentials};
pub use error::{BigQueryError, Result};
pub use query_data::QueryResultPage;
pub use query_job::QueryJob;
pub use row::{Row, Value};
pub use service::{JobService, QueryResultsOptions, TableResolver};
pub use structs::table_row::TableRow;
