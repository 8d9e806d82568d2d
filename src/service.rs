use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::structs::job_reference::JobReference;
use crate::structs::query_results::QueryResults;
use crate::structs::table::Table;
use crate::structs::table_reference::TableReference;

/// Paging and wait parameters for `jobs.getQueryResults`. Unset values are not
/// sent, leaving the service defaults in place (10000 ms for the timeout).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryResultsOptions {
    pub token: Option<String>,
    pub max_results: Option<u32>,
    pub start_index: Option<u64>,
    pub timeout_ms: Option<u64>,
}

impl QueryResultsOptions {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_start_index(mut self, start_index: u64) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Query string parameters, in api naming.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(token) = &self.token {
            pairs.push(("pageToken", token.clone()));
        }
        if let Some(max) = self.max_results {
            pairs.push(("maxResults", max.to_string()));
        }
        if let Some(start) = self.start_index {
            pairs.push(("startIndex", start.to_string()));
        }
        if let Some(timeout) = self.timeout_ms {
            pairs.push(("timeoutMs", timeout.to_string()));
        }
        pairs
    }
}

/// Fetches query result pages for a job.
#[async_trait]
pub trait JobService: Send + Sync + fmt::Debug {
    async fn get_query_results(
        &self,
        job: &JobReference,
        options: &QueryResultsOptions,
    ) -> Result<QueryResults>;
}

/// Looks tables up by reference.
#[async_trait]
pub trait TableResolver: Send + Sync + fmt::Debug {
    async fn get_table(&self, table: &TableReference) -> Result<Table>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_send_nothing() {
        assert!(QueryResultsOptions::default().query_pairs().is_empty());
    }

    #[test]
    fn options_map_to_api_names() {
        let options = QueryResultsOptions::default()
            .with_token("token1234567890")
            .with_max_results(100)
            .with_start_index(25)
            .with_timeout_ms(10000);
        assert_eq!(
            options.query_pairs(),
            vec![
                ("pageToken", "token1234567890".to_string()),
                ("maxResults", "100".to_string()),
                ("startIndex", "25".to_string()),
                ("timeoutMs", "10000".to_string()),
            ]
        );
    }

    #[test]
    fn only_present_options_are_sent() {
        let options = QueryResultsOptions::default().with_max_results(5);
        assert_eq!(options.query_pairs(), vec![("maxResults", "5".to_string())]);
    }
}
