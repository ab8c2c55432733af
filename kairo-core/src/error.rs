use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read ingredient dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed ingredient dataset: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base URL for {name}: {reason}")]
    InvalidBaseUrl { name: &'static str, reason: String },

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
