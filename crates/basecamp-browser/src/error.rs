use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No cookie store found matching profile '{0}'")]
    StoreNotFound(String),

    #[error("Cookie store error: {0}")]
    Store(String),

    #[error("Decryption error: {0}")]
    Decrypt(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for basecamp_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::StoreNotFound(profile) => basecamp_core::Error::NotFound(profile),
            other => basecamp_core::Error::JarBuild(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
