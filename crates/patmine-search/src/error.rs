//! Mining errors. Every error ends the run; there is no recovery path.

use patmine_objects::ObjectError;
use patmine_oracle::OracleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MineError {
    #[error("object error: {0}")]
    Object(#[from] ObjectError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
}

pub type MineResult<T> = Result<T, MineError>;
