use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to the dashboard backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode the backend response: {0}")]
    Decode(String),

    #[error("Failed to read upload file: {0}")]
    Io(#[from] std::io::Error),
}
