use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch fund(s) {fund_ids:?}: {message}")]
    FetchFailure {
        fund_ids: Vec<String>,
        message: String,
    },

    #[error("Malformed fund record: {0}")]
    MalformedRecord(String),

    #[error("API error: {0}")]
    ApiError(String),
}
