use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidConfigValue { field: String, reason: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("remote API rejected the request ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Data processing error: {message}")]
    Processing { message: String },

    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

impl UploadError {
    pub fn validation(message: impl Into<String>) -> Self {
        UploadError::Validation {
            message: message.into(),
        }
    }

    /// HTTP status the gateway reports for this error. Remote rejections
    /// relay the upstream status; everything else is the caller's fault
    /// (400) or ours (500).
    pub fn status(&self) -> u16 {
        match self {
            UploadError::Remote { status, .. } => *status,
            UploadError::Validation { .. } => 400,
            _ => 500,
        }
    }

    /// The message placed in the `{error}` response body. Remote messages
    /// are relayed verbatim, without the Display prefix.
    pub fn response_message(&self) -> String {
        match self {
            UploadError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
