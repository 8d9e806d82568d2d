use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use yup_oauth2::authenticator::DefaultAuthenticator;

use crate::config::{ClientConfig, Credentials};
use crate::error::{BigQueryError, Result};
use crate::query_job::QueryJob;
use crate::service::{JobService, QueryResultsOptions, TableResolver};
use crate::structs::error_proto::ErrorProto;
use crate::structs::job::Job;
use crate::structs::job_reference::JobReference;
use crate::structs::query_results::QueryResults;
use crate::structs::table::Table;
use crate::structs::table_reference::TableReference;

struct InnerClient {
    authenticator: DefaultAuthenticator,
    reqwest_client: reqwest::Client,
    api_url: String,
}

/// BigQuery REST client. Cheap to clone; clones share one connection pool and
/// token cache.
#[derive(Clone)]
pub struct Client {
    inner_client: Arc<InnerClient>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.inner_client.api_url)
            .finish()
    }
}

const SCOPES: &[&str; 1] = &["https://www.googleapis.com/auth/bigquery"];

// Body of a non-2xx google api response.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorProto>,
}

impl Client {
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let authenticator = match &config.credentials {
            Credentials::AuthorizedUser(path) => {
                let secret = yup_oauth2::read_authorized_user_secret(path).await?;
                yup_oauth2::AuthorizedUserAuthenticator::builder(secret)
                    .build()
                    .await?
            }
            Credentials::ServiceAccount(path) => {
                let key = yup_oauth2::read_service_account_key(path).await?;
                yup_oauth2::ServiceAccountAuthenticator::builder(key)
                    .build()
                    .await?
            }
        };
        let reqwest_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Client {
            inner_client: Arc::new(InnerClient {
                authenticator,
                reqwest_client,
                api_url: config.api_url,
            }),
        })
    }

    /// Fetches a job resource.
    pub async fn get_job(&self, project_id: &str, job_id: &str) -> Result<Job> {
        let api_url = job_url(&self.inner_client.api_url, project_id, job_id);
        let job: Job = self.get(&api_url, &[]).await?;
        if let Some(errors) = job.status.as_ref().and_then(|s| s.errors.as_ref()) {
            for error in errors {
                warn!("Job {} reported error: {}", job_id, error.message);
            }
        }
        Ok(job)
    }

    /// Fetches a job and wraps it in a `QueryJob` backed by this client.
    pub async fn get_query_job(&self, project_id: &str, job_id: &str) -> Result<QueryJob> {
        let job = self.get_job(project_id, job_id).await?;
        let service = Arc::new(self.clone());
        Ok(QueryJob::new(job, service.clone(), service))
    }

    async fn get<T: DeserializeOwned>(&self, api_url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {} {:?}", api_url, query);
        let tok = self.inner_client.authenticator.token(SCOPES).await?;
        let res = self
            .inner_client
            .reqwest_client
            .get(api_url)
            .query(query)
            .bearer_auth(tok.as_str())
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl JobService for Client {
    async fn get_query_results(
        &self,
        job: &JobReference,
        options: &QueryResultsOptions,
    ) -> Result<QueryResults> {
        let (project_id, job_id) = job_path(job)?;
        let api_url = query_results_url(&self.inner_client.api_url, project_id, job_id);
        let mut query = options.query_pairs();
        if let Some(location) = &job.location {
            query.push(("location", location.clone()));
        }
        self.get(&api_url, &query).await
    }
}

#[async_trait]
impl TableResolver for Client {
    async fn get_table(&self, table: &TableReference) -> Result<Table> {
        let api_url = table_url(&self.inner_client.api_url, table);
        self.get(&api_url, &[]).await
    }
}

fn job_path(job: &JobReference) -> Result<(&str, &str)> {
    let job_id = job
        .job_id
        .as_deref()
        .ok_or(BigQueryError::MissingJobIdInGoogleApiResponse)?;
    let project_id = job
        .project_id
        .as_deref()
        .ok_or(BigQueryError::MissingProjectIdInGoogleApiResponse)?;
    Ok((project_id, job_id))
}

fn job_url(api_url: &str, project_id: &str, job_id: &str) -> String {
    format!(
        "{api_url}/projects/{project_id}/jobs/{job_id}",
        api_url = api_url,
        project_id = project_id,
        job_id = job_id
    )
}

fn query_results_url(api_url: &str, project_id: &str, job_id: &str) -> String {
    format!(
        "{api_url}/projects/{project_id}/queries/{job_id}",
        api_url = api_url,
        project_id = project_id,
        job_id = job_id
    )
}

fn table_url(api_url: &str, table: &TableReference) -> String {
    format!(
        "{api_url}/projects/{project_id}/datasets/{dataset_id}/tables/{table_id}",
        api_url = api_url,
        project_id = table.project_id,
        dataset_id = table.dataset_id,
        table_id = table.table_id
    )
}

fn api_error(status: u16, body: &str) -> BigQueryError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => match error.errors.first() {
            Some(ErrorProto {
                reason: Some(reason),
                ..
            }) => format!("{} ({})", error.message, reason),
            _ => error.message,
        },
        Err(_) => body.to_string(),
    };
    BigQueryError::ApiResponse { status, message }
}
