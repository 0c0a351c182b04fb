use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitdashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Snapshot was not persisted: {0}")]
    Persist(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, FitdashError>;
