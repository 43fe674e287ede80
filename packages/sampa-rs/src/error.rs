use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to parse sample data: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SampaError>;
