use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::stream::{self, Stream};
use log::warn;

use crate::error::{BigQueryError, Result};
use crate::query_data::QueryResultPage;
use crate::service::{JobService, QueryResultsOptions, TableResolver};
use crate::structs::error_proto::ErrorProto;
use crate::structs::job::Job;
use crate::structs::job_configuration_query::{JobConfigurationQuery, Priority};
use crate::structs::job_reference::JobReference;
use crate::structs::job_statistics::{JobStatistics, JobStatistics2};
use crate::structs::job_status::State;
use crate::structs::table::Table;

/// A query job as last fetched from the api.
///
/// Every accessor reads the snapshot taken at construction; refetch the job
/// to observe progress. Only `query_results`, `results_pages` and
/// `destination` go back to the service.
#[derive(Clone)]
pub struct QueryJob {
    inner_job: Job,
    service: Arc<dyn JobService>,
    tables: Arc<dyn TableResolver>,
}

impl fmt::Debug for QueryJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryJob")
            .field("inner_job", &self.inner_job)
            .finish()
    }
}

impl QueryJob {
    pub fn new(job: Job, service: Arc<dyn JobService>, tables: Arc<dyn TableResolver>) -> Self {
        let query_job = QueryJob {
            inner_job: job,
            service,
            tables,
        };
        if !query_job.flatten() && !query_job.large_results() {
            warn!(
                "Job {:?} disables flattenResults without allowLargeResults",
                query_job.job_id()
            );
        }
        query_job
    }

    /// The raw job resource.
    pub fn job(&self) -> &Job {
        &self.inner_job
    }

    fn config(&self) -> Option<&JobConfigurationQuery> {
        self.inner_job
            .configuration
            .as_ref()
            .and_then(|c| c.query.as_ref())
    }

    fn statistics(&self) -> Option<&JobStatistics> {
        self.inner_job.statistics.as_ref()
    }

    fn query_statistics(&self) -> Option<&JobStatistics2> {
        self.statistics().and_then(|s| s.query.as_ref())
    }

    fn job_reference(&self) -> Option<&JobReference> {
        self.inner_job.job_reference.as_ref()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_reference().and_then(|r| r.job_id.as_deref())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.job_reference().and_then(|r| r.project_id.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        self.job_reference().and_then(|r| r.location.as_deref())
    }

    pub fn user_email(&self) -> Option<&str> {
        self.inner_job.user_email.as_deref()
    }

    /// The SQL text of the query.
    pub fn query(&self) -> Option<&str> {
        self.config().and_then(|c| c.query.as_deref())
    }

    // Status

    pub fn state(&self) -> Option<State> {
        self.inner_job.status.as_ref().and_then(|s| s.state)
    }

    pub fn is_pending(&self) -> bool {
        self.state() == Some(State::Pending)
    }

    pub fn is_running(&self) -> bool {
        self.state() == Some(State::Running)
    }

    pub fn is_done(&self) -> bool {
        self.state() == Some(State::Done)
    }

    /// Done, but with an error result.
    pub fn is_failed(&self) -> bool {
        self.is_done() && self.error().is_some()
    }

    /// The error that made the job fail, if it did.
    pub fn error(&self) -> Option<&ErrorProto> {
        self.inner_job
            .status
            .as_ref()
            .and_then(|s| s.error_result.as_ref())
    }

    /// All errors seen while running, including non-fatal ones.
    pub fn errors(&self) -> &[ErrorProto] {
        self.inner_job
            .status
            .as_ref()
            .and_then(|s| s.errors.as_deref())
            .unwrap_or_default()
    }

    pub fn created_at(&self) -> Option<SystemTime> {
        millis_to_time(self.statistics().and_then(|s| s.creation_time))
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        millis_to_time(self.statistics().and_then(|s| s.start_time))
    }

    pub fn ended_at(&self) -> Option<SystemTime> {
        millis_to_time(self.statistics().and_then(|s| s.end_time))
    }

    // Configuration

    pub fn priority(&self) -> Option<Priority> {
        self.config().and_then(|c| c.priority)
    }

    pub fn is_batch(&self) -> bool {
        self.priority() == Some(Priority::Batch)
    }

    /// Unset priority is interactive, the service default.
    pub fn is_interactive(&self) -> bool {
        matches!(self.priority(), None | Some(Priority::Interactive))
    }

    /// Whether arbitrarily large results are allowed, at a slight cost to
    /// performance. Defaults to false.
    pub fn large_results(&self) -> bool {
        self.config()
            .and_then(|c| c.allow_large_results)
            .unwrap_or(false)
    }

    /// Whether the query cache is consulted. Defaults to false.
    pub fn cache(&self) -> bool {
        self.config()
            .and_then(|c| c.use_query_cache)
            .unwrap_or(false)
    }

    /// Whether nested and repeated fields are flattened. Defaults to true.
    /// When false, `large_results` is expected to be true.
    pub fn flatten(&self) -> bool {
        self.config()
            .and_then(|c| c.flatten_results)
            .unwrap_or(true)
    }

    /// Whether the query uses legacy SQL. Defaults to true.
    pub fn legacy_sql(&self) -> bool {
        self.config().and_then(|c| c.use_legacy_sql).unwrap_or(true)
    }

    // Statistics

    /// Whether results came from the query cache. `None` until statistics are
    /// populated.
    pub fn cache_hit(&self) -> Option<bool> {
        self.query_statistics().and_then(|s| s.cache_hit)
    }

    /// `None` when the statistic is missing or not an integer.
    pub fn bytes_processed(&self) -> Option<i64> {
        self.query_statistics().and_then(|s| s.total_bytes_processed)
    }

    /// The table holding the results, looked up through the table resolver.
    /// No lookup happens when the job has no destination table.
    pub async fn destination(&self) -> Result<Option<Table>> {
        match self.config().and_then(|c| c.destination_table.as_ref()) {
            Some(table) => Ok(Some(self.tables.get_table(table).await?)),
            None => Ok(None),
        }
    }

    /// Fetches one page of results. May wait up to `timeout_ms` for the query
    /// to complete; check `job_complete` on the page. Errors from the service
    /// are returned as they are, without retrying.
    pub async fn query_results(&self, options: QueryResultsOptions) -> Result<QueryResultPage> {
        let job_reference = self
            .job_reference()
            .filter(|r| r.job_id.is_some())
            .ok_or(BigQueryError::MissingJobIdInGoogleApiResponse)?;
        let results = self
            .service
            .get_query_results(job_reference, &options)
            .await?;
        Ok(results.into())
    }

    /// All pages, starting at `options` and following page tokens until a
    /// page comes back without one. Stops after the first error.
    pub fn results_pages(
        &self,
        options: QueryResultsOptions,
    ) -> impl Stream<Item = Result<QueryResultPage>> + '_ {
        stream::try_unfold(
            Some(options),
            move |next: Option<QueryResultsOptions>| async move {
                let Some(options) = next else {
                    return Ok(None);
                };
                let page = self.query_results(options.clone()).await?;
                let next = page.token().map(|token| QueryResultsOptions {
                    token: Some(token.to_string()),
                    start_index: None,
                    ..options
                });
                Ok::<_, BigQueryError>(Some((page, next)))
            },
        )
    }
}

fn millis_to_time(millis: Option<i64>) -> Option<SystemTime> {
    let millis = u64::try_from(millis?).ok()?;
    UNIX_EPOCH.checked_add(Duration::from_millis(millis))
}
