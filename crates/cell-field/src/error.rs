use cell_core::SubstanceId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("substance {0} is not defined")]
    UndefinedSubstance(SubstanceId),

    #[error("substance \"{0}\" is already defined")]
    DuplicateSubstance(String),

    #[error("substance resolution must be at least 1, got {0}")]
    ZeroResolution(usize),
}

pub type FieldResult<T> = Result<T, FieldError>;
