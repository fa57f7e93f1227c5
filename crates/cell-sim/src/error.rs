use cell_agent::BehaviorError;
use cell_core::CoreError;
use cell_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match cell count {expected}")]
    CellCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("behavior protocol violation: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("substance field error: {0}")]
    Field(#[from] FieldError),
}

pub type SimResult<T> = Result<T, SimError>;
