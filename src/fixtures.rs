//! Canned api payloads and a recording stand-in for the remote service.
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{BigQueryError, Result};
use crate::service::{JobService, QueryResultsOptions, TableResolver};
use crate::structs::job_reference::JobReference;
use crate::structs::query_results::QueryResults;
use crate::structs::table::Table;
use crate::structs::table_reference::TableReference;

pub const PROJECT: &str = "test-project";

// Epoch millis as a string, like every int64 the api returns.
pub fn time_millis() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

pub fn random_job_hash(id: &str, state: &str) -> Value {
    json!({
        "kind": "bigquery#job",
        "etag": "etag",
        "id": format!("{}:{}", PROJECT, id),
        "selfLink": format!("http://bigquery/projects/{}/jobs/{}", PROJECT, id),
        "jobReference": {
            "projectId": PROJECT,
            "jobId": id
        },
        "configuration": {
            "dryRun": false
        },
        "status": {
            "state": state
        },
        "statistics": {
            "creationTime": time_millis(),
            "startTime": time_millis(),
            "endTime": time_millis()
        },
        "user_email": "user@example.com"
    })
}

pub fn query_job_json(query: &str) -> Value {
    json!({
        "configuration": {
            "query": {
                "query": query,
                "defaultDataset": null,
                "destinationTable": null,
                "createDisposition": null,
                "writeDisposition": null,
                "priority": "INTERACTIVE",
                "allowLargeResults": null,
                "useQueryCache": true,
                "flattenResults": null,
                "useLegacySql": null
            }
        }
    })
}

/// A running query job: `random_job_hash` merged with a query configuration.
pub fn query_job_hash(id: &str, query: &str) -> Value {
    let mut job = random_job_hash(id, "running");
    job["configuration"]["query"] = query_job_json(query)["configuration"]["query"].clone();
    job
}

pub fn query_data_hash(token: &str) -> Value {
    json!({
        "kind": "bigquery#getQueryResultsResponse",
        "etag": "etag1234567890",
        "jobReference": {
            "projectId": PROJECT,
            "jobId": "job9876543210"
        },
        "schema": {
            "fields": [
                { "name": "name", "type": "STRING", "mode": "NULLABLE" },
                { "name": "age", "type": "INTEGER", "mode": "NULLABLE" },
                { "name": "score", "type": "FLOAT", "mode": "NULLABLE" },
                { "name": "active", "type": "BOOLEAN", "mode": "NULLABLE" }
            ]
        },
        "rows": [
            { "f": [ { "v": "Heidi" }, { "v": "36" }, { "v": "7.65" }, { "v": "true" } ] },
            { "f": [ { "v": "Aaron" }, { "v": "42" }, { "v": "8.15" }, { "v": "false" } ] },
            { "f": [ { "v": "Sally" }, { "v": null }, { "v": null }, { "v": null } ] }
        ],
        "pageToken": token,
        "totalRows": 3,
        "totalBytesProcessed": "456789",
        "jobComplete": true,
        "cacheHit": false
    })
}

pub fn random_table_hash(dataset: &str, id: &str, project_id: Option<&str>) -> Value {
    json!({
        "kind": "bigquery#table",
        "etag": "etag123456789",
        "id": format!("{}:{}.{}", PROJECT, dataset, id),
        "selfLink": format!(
            "http://googleapi/bigquery/v2/projects/{}/datasets/{}/tables/{}",
            PROJECT, dataset, id
        ),
        "tableReference": {
            "projectId": project_id.unwrap_or(PROJECT),
            "datasetId": dataset,
            "tableId": id
        },
        "friendlyName": "Table Name",
        "description": null,
        "schema": {
            "fields": [
                { "name": "name", "type": "STRING", "mode": "REQUIRED" },
                { "name": "age", "type": "INTEGER" },
                { "name": "score", "type": "FLOAT", "description": "A score from 0.0 to 10.0" },
                { "name": "active", "type": "BOOLEAN" }
            ]
        },
        "numBytes": "1000",
        "numRows": "100",
        "creationTime": time_millis(),
        "expirationTime": time_millis(),
        "lastModifiedTime": time_millis(),
        "type": "TABLE",
        "location": "US"
    })
}

pub fn destination_table_json() -> Value {
    let mut table = random_table_hash("getting_replaced_dataset_id", "my_table", None);
    table["tableReference"] = json!({
        "projectId": "target_project_id",
        "datasetId": "target_dataset_id",
        "tableId": "target_table_id"
    });
    table
}

/// Replays queued pages and tables, and records every request it sees.
#[derive(Debug, Default)]
pub struct MockService {
    pages: Mutex<VecDeque<Value>>,
    tables: Mutex<Vec<Value>>,
    result_calls: Mutex<Vec<(JobReference, QueryResultsOptions)>>,
    table_calls: Mutex<Vec<TableReference>>,
}

impl MockService {
    pub fn with_pages(pages: Vec<Value>) -> Self {
        MockService {
            pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn with_tables(tables: Vec<Value>) -> Self {
        MockService {
            tables: Mutex::new(tables),
            ..Default::default()
        }
    }

    pub fn result_calls(&self) -> Vec<(JobReference, QueryResultsOptions)> {
        self.result_calls.lock().unwrap().clone()
    }

    pub fn table_calls(&self) -> Vec<TableReference> {
        self.table_calls.lock().unwrap().clone()
    }
}

fn not_found(what: String) -> BigQueryError {
    BigQueryError::ApiResponse {
        status: 404,
        message: format!("Not found: {}", what),
    }
}

#[async_trait]
impl JobService for MockService {
    async fn get_query_results(
        &self,
        job: &JobReference,
        options: &QueryResultsOptions,
    ) -> Result<QueryResults> {
        self.result_calls
            .lock()
            .unwrap()
            .push((job.clone(), options.clone()));
        let page = self.pages.lock().unwrap().pop_front();
        match page {
            Some(page) => Ok(serde_json::from_value(page)?),
            None => Err(not_found(format!("Job {:?}", job.job_id))),
        }
    }
}

#[async_trait]
impl TableResolver for MockService {
    async fn get_table(&self, table: &TableReference) -> Result<Table> {
        self.table_calls.lock().unwrap().push(table.clone());
        let tables = self.tables.lock().unwrap();
        let found = tables
            .iter()
            .find(|t| t["tableReference"] == serde_json::to_value(table).unwrap_or_default());
        match found {
            Some(found) => Ok(serde_json::from_value(found.clone())?),
            None => Err(not_found(format!("Table {}", table))),
        }
    }
}
