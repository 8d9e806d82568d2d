use crate::error::Result;
use crate::row::{self, Row};
use crate::structs::error_proto::ErrorProto;
use crate::structs::job_reference::JobReference;
use crate::structs::query_results::QueryResults;
use crate::structs::table_row::TableRow;
use crate::structs::table_schema::TableSchema;

/// One page of query results, as returned by `jobs.getQueryResults`.
#[derive(Debug, Clone)]
pub struct QueryResultPage {
    inner: QueryResults,
}

impl From<QueryResults> for QueryResultPage {
    fn from(inner: QueryResults) -> Self {
        QueryResultPage { inner }
    }
}

impl QueryResultPage {
    pub fn rows(&self) -> &[TableRow] {
        self.inner.rows.as_deref().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    /// Continuation token for the next page.
    pub fn token(&self) -> Option<&str> {
        self.inner.page_token.as_deref()
    }

    pub fn has_next(&self) -> bool {
        self.token().is_some()
    }

    /// Total rows in the whole result set, not just this page.
    pub fn total(&self) -> Option<i64> {
        self.inner.total_rows
    }

    pub fn total_bytes_processed(&self) -> Option<i64> {
        self.inner.total_bytes_processed
    }

    /// False until the query finished; rows and schema are absent until then.
    pub fn job_complete(&self) -> bool {
        self.inner.job_complete.unwrap_or(false)
    }

    pub fn cache_hit(&self) -> Option<bool> {
        self.inner.cache_hit
    }

    pub fn schema(&self) -> Option<&TableSchema> {
        self.inner.schema.as_ref()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.schema().map(TableSchema::headers).unwrap_or_default()
    }

    pub fn job_reference(&self) -> Option<&JobReference> {
        self.inner.job_reference.as_ref()
    }

    pub fn errors(&self) -> &[ErrorProto] {
        self.inner.errors.as_deref().unwrap_or_default()
    }

    pub fn etag(&self) -> Option<&str> {
        self.inner.etag.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.inner.kind.as_deref()
    }

    /// Rows decoded with the page schema.
    pub fn formatted_rows(&self) -> Result<Vec<Row>> {
        match self.schema() {
            Some(schema) => row::format_rows(self.rows(), &schema.fields),
            None => Ok(Vec::new()),
        }
    }

    pub fn into_inner(self) -> QueryResults {
        self.inner
    }
}
