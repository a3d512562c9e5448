use thiserror::Error;

use crate::operation::Operation;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} is not implemented by this backend")]
    NotImplemented(Operation),

    /// Failure reported by the backend, propagated unchanged
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("Unknown store operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// The operation a `NotImplemented` error names
    pub fn missing_operation(&self) -> Option<Operation> {
        match self {
            StoreError::NotImplemented(op) => Some(*op),
            _ => None,
        }
    }
}
