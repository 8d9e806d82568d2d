#[derive(thiserror::Error, Debug)]
pub enum BigQueryError {
    #[error("Authentication error (error: {0})")]
    YupAuthError(#[from] yup_oauth2::Error),
    #[error("Request to google api error (error: {0})")]
    ApiRequestError(#[from] reqwest::Error),
    #[error("Google api returned HTTP {status}: {message}")]
    ApiResponse { status: u16, message: String },
    #[error("Failed to decode google api response (error: {0})")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Failed to read credentials (error: {0})")]
    Credentials(#[from] std::io::Error),
    #[error("Malformed google api response: missing job_id")]
    MissingJobIdInGoogleApiResponse,
    #[error("Malformed google api response: missing project_id")]
    MissingProjectIdInGoogleApiResponse,
    #[error("Row has {found} fields, expected at least {expected}")]
    NotEnoughFields { expected: usize, found: usize },
    #[error("Unexpected field type: {0}")]
    UnexpectedFieldType(String),
}

pub type Result<T> = std::result::Result<T, BigQueryError>;
