use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Where the OAuth credentials come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `gcloud auth application-default login` output.
    AuthorizedUser(PathBuf),
    /// A downloaded service account key.
    ServiceAccount(PathBuf),
}

impl Default for Credentials {
    fn default() -> Self {
        let home = env::var("HOME").unwrap_or_default();
        Credentials::AuthorizedUser(
            PathBuf::from(home).join(".config/gcloud/application_default_credentials.json"),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub credentials: Credentials,
    pub connect_timeout: Duration,
    /// Must outlast the `timeoutMs` sent with query result requests.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials: Credentials::default(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            user_agent: format!("bq_query_job/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Reads `BIGQUERY_API_URL`, `BIGQUERY_SERVICE_ACCOUNT_KEY` and
    /// `BIGQUERY_USER_CREDENTIALS`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ClientConfig::default();
        if let Some(url) = lookup("BIGQUERY_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = lookup("BIGQUERY_SERVICE_ACCOUNT_KEY") {
            config.credentials = Credentials::ServiceAccount(path.into());
        } else if let Some(path) = lookup("BIGQUERY_USER_CREDENTIALS") {
            config.credentials = Credentials::AuthorizedUser(path.into());
        }
        config
    }
}
