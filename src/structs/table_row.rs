use crate::structs::row_field::RowField;
use serde::{Deserialize, Serialize};

// https://cloud.google.com/bigquery/docs/reference/rest/v2/jobs/getQueryResults
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "f", default)]
    pub fields: Vec<RowField>,
}
