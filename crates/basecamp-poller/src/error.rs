use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid endpoint: {0}")]
    InvalidUrl(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else {
            Error::Http(err.to_string())
        }
    }
}

impl From<Error> for basecamp_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Timeout(msg) => basecamp_core::Error::Timeout(msg),
            other => basecamp_core::Error::Network(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
