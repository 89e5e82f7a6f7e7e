use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("table has no columns to read phone numbers from")]
    NoColumns,
    #[error("invalid strategy name: {0:?}")]
    InvalidStrategyName(String),
    #[error("strategy list is empty")]
    EmptyStrategyList,
    #[error("upload {0} is empty")]
    EmptyUpload(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
