use thiserror::Error;

/// Every way a `check` run can fail. Each variant ends up as the same
/// error-class status record; the variant only matters for logs and exit output.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("No cookie store found matching profile '{0}'")]
    NotFound(String),

    #[error("Failed to create cookie jar: {0}")]
    JarBuild(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API response was not JSON (Status: {status}): {message}")]
    Parse { status: u16, message: String },

    #[error("Unexpected response shape (Status: {status}): {message}")]
    Shape { status: u16, message: String },

    #[error("API Error: {0}")]
    Api(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
