use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
