use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unsupported assessment type: {0}")]
    Unsupported(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
