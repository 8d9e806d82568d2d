use serde::{Deserialize, Serialize};

// https://cloud.google.com/bigquery/docs/reference/rest/v2/Job#JobStatistics
// Times are epoch milliseconds. Unparseable int64 values decode as None, the
// statistics may still be filling in while the job runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    #[serde(
        default,
        with = "crate::structs::int64",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_time: Option<i64>,
    #[serde(
        default,
        with = "crate::structs::int64",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<i64>,
    #[serde(
        default,
        with = "crate::structs::int64",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<i64>,
    #[serde(
        default,
        with = "crate::structs::int64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_bytes_processed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<JobStatistics2>,
}

// Query specific statistics.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics2 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit: Option<bool>,
    #[serde(
        default,
        with = "crate::structs::int64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_bytes_processed: Option<i64>,
    #[serde(
        default,
        with = "crate::structs::int64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_bytes_billed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_tier: Option<i64>,
}
