use thiserror::Error;

use crate::behavior::BehaviorKind;

/// Contract and configuration failures raised by behavior units.
///
/// A [`KindMismatch`][BehaviorError::KindMismatch] is a scenario-construction
/// bug, not a runtime condition: callers that cannot recover should abort the
/// run with the message.  Returning it as a typed error (rather than aborting
/// in place) lets tests assert on the violation.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("initialize for {expected} received an originating behavior of kind {found}")]
    KindMismatch {
        expected: BehaviorKind,
        found: BehaviorKind,
    },

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
