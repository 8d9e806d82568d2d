use serde::{Deserialize, Serialize};

// https://cloud.google.com/bigquery/docs/reference/rest/v2/jobs/getQueryResults
// A cell holds a string, null, a nested {"f": [...]} record or an array of
// {"v": ...} cells for repeated columns.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowField {
    #[serde(rename = "v", default)]
    pub value: serde_json::Value,
}
