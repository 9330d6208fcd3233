use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("No candidate: {0}")]
    NoCandidate(String),
}

impl From<serde_json::Error> for LocationError {
    fn from(error: serde_json::Error) -> Self {
        LocationError::ParsingError(error.to_string())
    }
}
