use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unable to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset header is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("row on line {line} has {found} fields but the header declares {expected}")]
    RowTooLong {
        line: u64,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request body could not be read: {0}")]
    Unreadable(String),
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(serde_json::Error),
    #[error("{0}")]
    InvalidEnvelope(serde_json::Error),
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unreadable(_) | RequestError::MalformedJson(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RequestError::InvalidEnvelope(_) => StatusCode::BAD_REQUEST,
        }
    }
}
