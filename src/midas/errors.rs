use thiserror::Error;

#[derive(Error, Debug)]
pub enum MidasClientError {
    #[error("Client error: {0}")]
    ClientError(#[from] reqwest::Error),
    #[error("Invalid response status: {status}")]
    InvalidResponseStatus { status: reqwest::StatusCode },
    #[error("Invalid header value")]
    InvalidHeader,
    #[error("Empty token in register response")]
    EmptyToken,
}
