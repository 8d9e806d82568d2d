use crate::structs::dataset_reference::DatasetReference;
use crate::structs::table_reference::TableReference;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Interactive,
    Batch,
    #[serde(other)]
    Unknown,
}

// https://cloud.google.com/bigquery/docs/reference/rest/v2/Job#JobConfigurationQuery
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigurationQuery {
    // Actual SQL query text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dataset: Option<DatasetReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_table: Option<TableReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_disposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_disposition: Option<String>,
    // Unset means INTERACTIVE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_large_results: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_query_cache: Option<bool>,
    // Only honoured together with allow_large_results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flatten_results: Option<bool>,
    // Changes syntax of SQL query. See https://cloud.google.com/bigquery/docs/reference/legacy-sql for details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_legacy_sql: Option<bool>,
}
