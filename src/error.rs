use reqwest::StatusCode;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DoctorError {
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("invalid Supabase base URL `{0}`: expected an http(s) URL")]
    InvalidBaseUrl(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

impl DoctorError {
    /// Transport failures and 5xx responses are worth another attempt;
    /// anything the backend answered deliberately is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            DoctorError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            DoctorError::UpstreamStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

impl From<figment::Error> for DoctorError {
    fn from(e: figment::Error) -> Self {
        DoctorError::Config(Box::new(e))
    }
}
