// Error types for the comparison library

use crate::parser::LoadError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type CompareResult<T> = Result<T, CompareError>;
